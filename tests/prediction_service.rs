//! End-to-end tests: raw vitals through the pipeline to a stub prediction service.

mod common;

use std::sync::Arc;
use std::time::Duration;

use cardiocheck::adapters::HttpPredictor;
use cardiocheck::application::AssessmentService;
use cardiocheck::ports::{PredictionError, Predictor};
use cardiocheck::{compute_features, CardioError, RawInput, RiskClass};

fn vitals() -> RawInput {
    RawInput {
        age: "45".to_string(),
        gender: "2".to_string(),
        systolic_bp: "130".to_string(),
        diastolic_bp: "85".to_string(),
        cholesterol: "1".to_string(),
        glucose: "1".to_string(),
        smoker: "0".to_string(),
        alcohol: "0".to_string(),
        active: "1".to_string(),
        weight: "80".to_string(),
        height: "180".to_string(),
    }
}

fn predictor(url: &str) -> HttpPredictor {
    HttpPredictor::new(url, Duration::from_secs(5)).expect("client builds")
}

#[test]
fn posts_feature_vector_as_json() {
    let (url, server) = common::serve_once("200 OK", r#"{"prediction": 0.0}"#);

    let response = predictor(&url)
        .predict(&compute_features(&vitals()))
        .expect("prediction succeeds");
    assert_eq!(response.prediction, 0.0);

    let request = server.join().expect("stub thread");
    assert_eq!(request.request_line(), "POST /predict HTTP/1.1");
    assert_eq!(
        request.header("content-type").as_deref(),
        Some("application/json")
    );

    let body: serde_json::Value = serde_json::from_str(&request.body).expect("json body");
    let features = body["features"].as_array().expect("features array");
    let values: Vec<f64> = features.iter().map(|v| v.as_f64().expect("number")).collect();
    assert_eq!(values.len(), 11);
    assert_eq!(&values[..9], &[45.0, 2.0, 130.0, 85.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
    assert!((values[9] - 24.69).abs() < 0.01);
    assert_eq!(values[10], 45.0);
}

#[test]
fn unparsable_vitals_are_sent_as_null() {
    let (url, server) = common::serve_once("200 OK", r#"{"prediction": 1}"#);

    let mut raw = vitals();
    raw.weight = "heavy".to_string();
    predictor(&url)
        .predict(&compute_features(&raw))
        .expect("prediction succeeds");

    let request = server.join().expect("stub thread");
    let body: serde_json::Value = serde_json::from_str(&request.body).expect("json body");
    assert!(body["features"][9].is_null());
    assert_eq!(body["features"][0], 45.0);
}

#[test]
fn error_status_is_generic_failure() {
    let (url, server) = common::serve_once("500 Internal Server Error", r#"{"detail": "boom"}"#);

    let err = predictor(&url)
        .predict(&compute_features(&vitals()))
        .expect_err("should fail");
    assert_eq!(err, PredictionError::Status(500));
    assert_eq!(err.to_string(), "Failed to get prediction");
    server.join().expect("stub thread");
}

#[test]
fn malformed_response_is_generic_failure() {
    let (url, server) = common::serve_once("200 OK", r#"{"result": "high"}"#);

    let err = predictor(&url)
        .predict(&compute_features(&vitals()))
        .expect_err("should fail");
    assert!(matches!(err, PredictionError::Decode(_)));
    assert_eq!(err.to_string(), "Failed to get prediction");
    server.join().expect("stub thread");
}

#[test]
fn assessment_with_swapped_pressure_and_outlier_age() {
    let (url, server) = common::serve_once(
        "200 OK",
        r#"{"prediction": 1, "probability": 0.81, "confidence": 0.62}"#,
    );

    let mut raw = vitals();
    raw.age = "30".to_string();
    raw.systolic_bp = "70".to_string();
    raw.diastolic_bp = "110".to_string();

    let service = AssessmentService::new(Arc::new(predictor(&url)));
    let assessment = service.assess(&raw).expect("assessment succeeds");

    assert_eq!(assessment.risk, RiskClass::High);
    assert_eq!(assessment.response.probability, Some(0.81));
    assert_eq!(assessment.response.confidence, Some(0.62));
    assert_eq!(assessment.features.age(), 53.0);
    assert_eq!(assessment.features.systolic_bp(), 110.0);
    assert_eq!(assessment.features.diastolic_bp(), 70.0);
    assert_eq!(assessment.features.pulse_pressure(), 40.0);

    let request = server.join().expect("stub thread");
    let body: serde_json::Value = serde_json::from_str(&request.body).expect("json body");
    assert_eq!(body["features"][0], 53.0);
    assert_eq!(body["features"][2], 110.0);
    assert_eq!(body["features"][3], 70.0);
}

#[test]
fn service_failure_maps_to_library_error() {
    let (url, server) = common::serve_once("404 Not Found", "{}");

    let service = AssessmentService::new(Arc::new(predictor(&url)));
    let err = service.assess(&vitals()).expect_err("should fail");
    assert!(matches!(
        err,
        CardioError::Prediction(PredictionError::Status(404))
    ));
    server.join().expect("stub thread");
}
