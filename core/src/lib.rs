//! Monte Carlo engine for the Monty Hall problem.
//!
//! Dependency order: `rng` feeds `trial`, `trial` feeds `batch`,
//! and `projection` reads a finished `BatchResult`. Nothing here
//! holds state between batches; callers keep the last result.

pub mod batch;
pub mod config;
pub mod error;
pub mod projection;
pub mod rng;
pub mod trial;
pub mod types;

pub use batch::{run_batch, run_batch_with_progress, BatchResult, BatchSummary};
pub use error::{SimError, SimResult};
pub use rng::{DoorRng, SimRng};
pub use trial::{generate_trial, Trial};
pub use types::Door;
