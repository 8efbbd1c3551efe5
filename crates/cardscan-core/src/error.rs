//! Error types for the cardscan-core library.
//!
//! Extraction itself is total and never fails; these errors only surface
//! while loading, validating or saving configuration.

use thiserror::Error;

/// Main error type for the cardscan library.
#[derive(Error, Debug)]
pub enum CardscanError {
    /// Configuration value out of range or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for the cardscan library.
pub type Result<T> = std::result::Result<T, CardscanError>;
