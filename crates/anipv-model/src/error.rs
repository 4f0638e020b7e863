use thiserror::Error;

/// Why the model artifact could not be turned into a [`crate::Model`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("model file '{path}' not found")]
    NotFound { path: String },

    /// Unreadable file, malformed JSON, or an artifact that fails validation.
    #[error("failed to load model: {0}")]
    Corrupt(String),
}

/// Fault raised while evaluating the model for one row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("model produced a non-finite prediction: {value}")]
    NonFinite { value: f64 },
}
