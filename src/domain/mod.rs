//! Domain layer: Core types and the feature pipeline.
//!
//! Pure Rust with no I/O. Everything here is deterministic and testable
//! without a terminal or a network.

mod features;
mod prediction;
mod vitals;

pub use features::{
    compute_features, FeatureVector, AGE_IMPUTED_MEAN, AGE_OUTLIER_THRESHOLD, FEATURE_COUNT,
    FEATURE_NAMES,
};
pub use prediction::{format_percent, Assessment, PredictionResponse, RiskClass};
pub use vitals::{parse_float, Field, FieldKind, RawInput};
