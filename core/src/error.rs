use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid input: trial count must be a positive integer, got {trial_count}")]
    InvalidInput { trial_count: u64 },

    #[error("Invalid door: expected 1, 2 or 3, got {value}")]
    InvalidDoor { value: u64 },

    #[error("Invariant violation in trial {trial}: {reason}")]
    InvariantViolation { trial: u64, reason: String },

    #[error("CSV format error at line {line}: {reason}")]
    CsvFormat { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
