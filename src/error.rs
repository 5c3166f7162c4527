//! Corpus Processor error types

use std::path::PathBuf;
use thiserror::Error;

/// Corpus Processor error type
#[derive(Error, Debug)]
pub enum Error {
    /// Input path does not exist
    #[error("{} does not exist", .0.display())]
    InputNotFound(PathBuf),

    /// Input could not be recognized as any supported archive format
    #[error("Format error: {0}")]
    Format(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Corpus Processor operations
pub type Result<T> = std::result::Result<T, Error>;
