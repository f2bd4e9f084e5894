//! Shared error types for the recommendation engine

use thiserror::Error;

/// Main error type for movemap operations
#[derive(Debug, Error)]
pub enum Error {
    /// The caller asked for the run to stop
    #[error("Operation cancelled")]
    Cancelled,

    /// Two feature vectors of different length were compared
    #[error("Dimension of vectors are not equal: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// No candidate class improved on the running minimum for a unit
    #[error("No nearest class found for {unit}")]
    MissingTarget { unit: String },

    /// Unsupported feature errors
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Malformed entity records or text-form lines
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Worker pool errors
    #[error("Concurrency error: {0}")]
    Concurrency(String),

    /// An algorithm panicked while computing refactorings
    #[error("Algorithm {algorithm} panicked: {message}")]
    AlgorithmPanicked { algorithm: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// A unit for which no class beat the running minimum
    pub fn missing_target(unit: impl Into<String>) -> Self {
        Self::MissingTarget { unit: unit.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// True when the error is the cooperative cancellation signal
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
