//! # CardioCheck
//!
//! Cardiovascular risk assessment client.
//!
//! This crate provides:
//! - The feature pipeline that turns raw vitals into the model's input vector
//! - An HTTP client for the external prediction service
//! - A terminal form for entering vitals and reading the result
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (RawInput, FeatureVector, Assessment) and the pipeline
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (reqwest, log sanitization)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{compute_features, Assessment, FeatureVector, RawInput, RiskClass};

/// Result type for CardioCheck operations
pub type Result<T> = std::result::Result<T, CardioError>;

/// Main error type for CardioCheck
#[derive(Debug, thiserror::Error)]
pub enum CardioError {
    #[error(transparent)]
    Prediction(#[from] ports::PredictionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// A form field failed validation; the message names the field.
    #[error("{0}")]
    Validation(String),
}
