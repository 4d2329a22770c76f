//! Prediction service response and its interpretation.

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;

/// Risk classification returned by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskClass {
    /// Model predicts no cardiovascular disease
    Low,
    /// Model predicts cardiovascular disease
    High,
}

impl RiskClass {
    /// Headline shown above the result.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Low => "Good News",
            Self::High => "Attention Required",
        }
    }

    /// Short label for the detail table.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::High => "High Risk",
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Low => {
                "Our assessment indicates a lower risk of cardiovascular disease. \
                 Continue maintaining a healthy lifestyle!"
            }
            Self::High => {
                "Our assessment indicates a higher risk of cardiovascular disease. \
                 We recommend consulting a healthcare professional for a detailed evaluation."
            }
        }
    }
}

impl std::fmt::Display for RiskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Body of a successful prediction response.
///
/// Only `prediction` is required. The service may send it as `1` or `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Binary prediction (0 = no disease, 1 = disease present)
    pub prediction: f64,

    /// Disease probability (0.0 to 1.0), display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,

    /// Model confidence (0.0 to 1.0), display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl PredictionResponse {
    #[must_use]
    pub fn risk_class(&self) -> RiskClass {
        if self.prediction == 1.0 {
            RiskClass::High
        } else {
            RiskClass::Low
        }
    }
}

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Feature vector that was sent
    pub features: FeatureVector,

    /// Service response
    pub response: PredictionResponse,

    pub risk: RiskClass,

    /// BMI from the raw form values, when weight and height were entered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,

    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    #[must_use]
    pub fn new(features: FeatureVector, response: PredictionResponse, bmi: Option<f64>) -> Self {
        Self {
            features,
            risk: response.risk_class(),
            response,
            bmi,
            assessed_at: chrono::Utc::now(),
        }
    }
}

/// Format a `[0, 1]` ratio as a percentage with one decimal.
#[must_use]
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
