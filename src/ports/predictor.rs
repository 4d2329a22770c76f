//! Predictor port: Trait for the external prediction service.
//!
//! This trait abstracts the transport (HTTP) from the application logic.

use crate::domain::{FeatureVector, PredictionResponse};

/// Errors from a prediction request.
///
/// Every variant displays the same generic message; the user is never shown
/// whether the network, the server, or the response body was at fault.
/// Use [`PredictionError::detail`] for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    #[error("Failed to get prediction")]
    Status(u16),

    #[error("Failed to get prediction")]
    Transport(String),

    #[error("Failed to get prediction")]
    Decode(String),
}

impl PredictionError {
    /// Underlying cause, for logs only.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Status(code) => format!("HTTP status {code}"),
            Self::Transport(e) => format!("transport: {e}"),
            Self::Decode(e) => format!("decode: {e}"),
        }
    }
}

/// Trait for sending a feature vector to a prediction model.
///
/// Implementations block until the response arrives; callers run them off
/// the UI thread.
pub trait Predictor: Send + Sync {
    /// Request a prediction for one feature vector.
    ///
    /// No retries are attempted.
    ///
    /// # Errors
    /// Returns `PredictionError` on any transport, status, or decode failure.
    fn predict(&self, features: &FeatureVector) -> Result<PredictionResponse, PredictionError>;
}
