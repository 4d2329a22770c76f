//! HTTP adapter: Implementation of `Predictor` over a JSON POST.
//!
//! Request: `POST <endpoint>` with body `{"features": [..11 numbers..]}` and
//! `Content-Type: application/json`. No authentication, no retry.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{FeatureVector, PredictionResponse};
use crate::ports::{PredictionError, Predictor};
use crate::CardioError;

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    features: &'a FeatureVector,
}

/// Blocking HTTP client for the prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: Client,
    endpoint: String,
}

impl HttpPredictor {
    /// Build a client for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    /// Returns `CardioError::Config` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CardioError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CardioError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<PredictionResponse, PredictionError> {
        debug!("Posting feature vector to prediction service");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { features })
            .send()
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Prediction service returned an error status");
            return Err(PredictionError::Status(status.as_u16()));
        }

        response
            .json::<PredictionResponse>()
            .map_err(|e| PredictionError::Decode(e.to_string()))
    }
}
