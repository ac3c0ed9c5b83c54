//! Random door selection.
//!
//! RULE: The trial generator never calls a platform RNG directly.
//! Every draw goes through a `DoorRng`, so a batch is fully
//! determined by the source it is handed. Production runs use
//! `SimRng`; tests can script the exact sequence of draws.

use crate::types::Door;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A uniform random choice over a small candidate list.
pub trait DoorRng {
    /// Draw a uniform index in `[0, len)`. `len` must be > 0.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Draw one door uniformly from `candidates`.
    /// Returns `None` only when there is nothing to choose from.
    fn pick_door(&mut self, candidates: &[Door]) -> Option<Door> {
        if candidates.is_empty() {
            return None;
        }
        candidates.get(self.pick_index(candidates.len())).copied()
    }
}

/// Seeded production source.
pub struct SimRng {
    seed:  u64,
    inner: Pcg64Mcg,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy. The chosen seed is logged so the run
    /// can be replayed with `--seed`.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        log::info!("No seed supplied, using seed={seed}");
        Self::new(seed)
    }

    /// Independent stream `stream` under a master seed. Used when one
    /// session runs several batches: batch k always gets the same
    /// stream no matter what ran before it.
    pub fn derived(master_seed: u64, stream: u64) -> Self {
        Self::new(master_seed ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DoorRng for SimRng {
    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "len must be > 0");
        self.inner.gen_range(0..len)
    }
}
