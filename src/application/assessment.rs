//! Assessment service: Orchestrates one risk assessment.
//!
//! This service coordinates:
//! - Feature computation from raw vitals
//! - The prediction request
//! - Building the `Assessment` record

use std::sync::Arc;

use crate::domain::{compute_features, Assessment, RawInput};
use crate::ports::Predictor;
use crate::CardioError;

/// Service for running a risk assessment against a predictor.
pub struct AssessmentService<P>
where
    P: Predictor,
{
    predictor: Arc<P>,
}

impl<P> AssessmentService<P>
where
    P: Predictor,
{
    pub fn new(predictor: Arc<P>) -> Self {
        Self { predictor }
    }

    /// Run the full assessment for one form submission.
    ///
    /// 1. Compute the feature vector (never fails)
    /// 2. Request a prediction
    /// 3. Build the assessment with the display BMI
    ///
    /// # Errors
    /// Returns `CardioError::Prediction` if the prediction request fails.
    pub fn assess(&self, raw: &RawInput) -> Result<Assessment, CardioError> {
        let features = compute_features(raw);

        tracing::info!("Starting risk assessment...");
        if tracing::enabled!(tracing::Level::DEBUG) {
            let pairs: Vec<String> = features
                .named()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            tracing::debug!("Computed feature vector: {}", pairs.join(" "));
        }
        if features.has_nan() {
            tracing::warn!("Feature vector contains unparsable values; sending as null");
        }

        let response = self.predictor.predict(&features).map_err(|e| {
            tracing::warn!("Prediction request failed: {}", e.detail());
            e
        })?;

        let assessment = Assessment::new(features, response, raw.display_bmi());

        tracing::info!(
            "Assessment complete: prediction={}, risk={}",
            assessment.response.prediction,
            assessment.risk
        );

        Ok(assessment)
    }
}
