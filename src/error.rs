//! Error types for randonaut

use thiserror::Error;

/// Main error type for randonaut operations
///
/// Every variant aborts the whole run; there is no partial result.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("QRNG provider error: {0}")]
    Provider(String),

    #[error("Normalization overflow: {value} reached modulus {modulus}")]
    NormalizationOverflow { value: u128, modulus: u128 },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for randonaut operations
pub type Result<T> = std::result::Result<T, Error>;
