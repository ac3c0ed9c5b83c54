//! Shared helpers for the integration tests.

#![allow(dead_code)]

use montyhall_core::DoorRng;

/// Replays a fixed list of indices, then fails loudly if asked for more.
pub struct ScriptedRng {
    draws: Vec<usize>,
    next:  usize,
}

impl ScriptedRng {
    pub fn new(draws: &[usize]) -> Self {
        Self { draws: draws.to_vec(), next: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl DoorRng for ScriptedRng {
    fn pick_index(&mut self, len: usize) -> usize {
        let idx = *self
            .draws
            .get(self.next)
            .unwrap_or_else(|| panic!("script exhausted after {} draws", self.next));
        assert!(idx < len, "scripted index {idx} out of range for {len} candidates");
        self.next += 1;
        idx
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
