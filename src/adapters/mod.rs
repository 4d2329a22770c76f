//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external libraries:
//! - `http`: reqwest client for the prediction service
//! - `sanitize`: vitals/credential filtering for logs

pub mod http;
pub mod sanitize;

pub use http::HttpPredictor;
