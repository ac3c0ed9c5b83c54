//! Batch aggregator: runs N trials and tallies both strategies.
//!
//! RULES:
//!   - Trial indices run 1..=N with no gaps, in generation order.
//!   - Every trial is kept. Truncation is a display concern only.
//!   - A batch either completes or returns an error; there is no
//!     partial BatchResult.

use crate::{
    error::{SimError, SimResult},
    rng::DoorRng,
    trial::{generate_trial, Trial},
};
use serde::{Deserialize, Serialize};

/// Upper bound on progress callbacks per batch, excluding the final one.
pub const PROGRESS_STEPS: u64 = 10;

/// The outcome of one full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub trials:      u64,
    pub switch_wins: u64,
    pub stay_wins:   u64,
    pub results:     Vec<Trial>,
}

/// The numbers shown in the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_trials: u64,
    pub switch_wins:  u64,
    pub stay_wins:    u64,
    /// Percent, two decimals.
    pub switch_pct:   f64,
    /// Percent, two decimals.
    pub stay_pct:     f64,
}

impl BatchResult {
    /// Rebuild an aggregate from a trial list, e.g. one read back from CSV.
    /// Recounts wins and requires indices 1..=N in order, N >= 1.
    pub fn from_trials(results: Vec<Trial>) -> SimResult<Self> {
        if results.is_empty() {
            return Err(SimError::InvalidInput { trial_count: 0 });
        }
        for (expected, t) in (1..).zip(results.iter()) {
            if t.trial != expected {
                return Err(SimError::InvariantViolation {
                    trial:  t.trial,
                    reason: format!("expected trial index {expected}"),
                });
            }
            t.validate()?;
        }
        let switch_wins = results.iter().filter(|t| t.switch_win).count() as u64;
        let stay_wins = results.iter().filter(|t| t.stay_win).count() as u64;
        Ok(Self {
            trials: results.len() as u64,
            switch_wins,
            stay_wins,
            results,
        })
    }

    pub fn switch_rate(&self) -> f64 {
        rate(self.switch_wins, self.trials)
    }

    pub fn stay_rate(&self) -> f64 {
        rate(self.stay_wins, self.trials)
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total_trials: self.trials,
            switch_wins:  self.switch_wins,
            stay_wins:    self.stay_wins,
            switch_pct:   round2(self.switch_rate() * 100.0),
            stay_pct:     round2(self.stay_rate() * 100.0),
        }
    }
}

/// Run `trial_count` trials and aggregate them.
pub fn run_batch<R: DoorRng + ?Sized>(trial_count: u64, rng: &mut R) -> SimResult<BatchResult> {
    run_batch_with_progress(trial_count, rng, |_, _| {})
}

/// Same as `run_batch`, reporting `(completed, total)` along the way.
///
/// The callback fires at most `PROGRESS_STEPS` times during the run
/// and once more when the last trial is in. It cannot pause or cancel
/// the batch.
pub fn run_batch_with_progress<R, F>(
    trial_count: u64,
    rng: &mut R,
    mut on_progress: F,
) -> SimResult<BatchResult>
where
    R: DoorRng + ?Sized,
    F: FnMut(u64, u64),
{
    if trial_count == 0 {
        return Err(SimError::InvalidInput { trial_count });
    }

    log::info!("Running {trial_count} trials");
    let step = trial_count.div_ceil(PROGRESS_STEPS);

    let mut results = Vec::with_capacity(capacity_hint(trial_count));
    let mut switch_wins = 0u64;
    let mut stay_wins = 0u64;

    for index in 1..=trial_count {
        let trial = generate_trial(rng, index)?;
        switch_wins += u64::from(trial.switch_win);
        stay_wins += u64::from(trial.stay_win);
        results.push(trial);

        if index % step == 0 && index < trial_count {
            log::debug!("progress {index}/{trial_count}");
            on_progress(index, trial_count);
        }
    }
    on_progress(trial_count, trial_count);

    log::info!(
        "Batch complete: trials={trial_count} switch_wins={switch_wins} stay_wins={stay_wins}"
    );

    Ok(BatchResult {
        trials: trial_count,
        switch_wins,
        stay_wins,
        results,
    })
}

fn capacity_hint(trial_count: u64) -> usize {
    usize::try_from(trial_count).unwrap_or(0)
}

fn rate(wins: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    wins as f64 / total as f64
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
