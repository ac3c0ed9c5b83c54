use crate::error::SimResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_TRIALS: u64 = 10_000_000;
pub const DEFAULT_MAX_ROWS: usize = 1000;

/// Application limits and defaults for a simulator front end.
///
/// The core never reads this itself: bounds are the caller's job,
/// and `run_batch` only rejects a zero trial count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Hard cap on trials per batch.
    pub max_trials: u64,
    /// Hard cap on rows in the detail table.
    pub max_rows: usize,
    pub default_trials: u64,
    pub default_rows: usize,
    pub show_details: bool,
    /// Fixed master seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_trials:     DEFAULT_MAX_TRIALS,
            max_rows:       DEFAULT_MAX_ROWS,
            default_trials: 1000,
            default_rows:   100,
            show_details:   false,
            seed:           None,
        }
    }
}

/// A requested value after bounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clamped<T> {
    pub value:    T,
    pub adjusted: bool,
}

impl SimConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Config with small limits for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            max_trials:     10_000,
            max_rows:       50,
            default_trials: 100,
            default_rows:   10,
            show_details:   true,
            seed:           Some(0x5EED),
        }
    }

    pub fn clamp_trials(&self, requested: u64) -> Clamped<u64> {
        clamp(requested, self.max_trials, "trials")
    }

    pub fn clamp_rows(&self, requested: usize) -> Clamped<usize> {
        clamp(requested, self.max_rows, "rows")
    }
}

fn clamp<T>(requested: T, max: T, what: &str) -> Clamped<T>
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    if requested > max {
        log::warn!("Max {what} is {max}. Value adjusted.");
        Clamped { value: max, adjusted: true }
    } else {
        Clamped { value: requested, adjusted: false }
    }
}
