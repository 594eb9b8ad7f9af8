//! Error types for puzzle setup and configuration.
//!
//! Strikes are not errors; they are reported as `PuzzleEvent`s.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("Unknown constant id: {0}")]
    UnknownConstant(u8),

    #[error("Invalid serial number: {0:?}")]
    InvalidSerial(String),

    #[error("Invalid stage count: {0}")]
    InvalidStageCount(i64),

    #[error("Invalid button digit: {0}")]
    InvalidDigit(u8),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
