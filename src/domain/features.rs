//! Feature pipeline: raw vitals to the model's feature vector.
//!
//! Two cleaning rules from the model's offline data exploration are applied
//! before the derived features are computed:
//! - ages below 39 are replaced by the training mean of 53;
//! - a systolic reading below the diastolic one is swapped.

use serde::Serialize;

use super::vitals::{parse_float, RawInput};

/// Number of values the prediction model consumes.
pub const FEATURE_COUNT: usize = 11;

/// Ages strictly below this are treated as outliers.
pub const AGE_OUTLIER_THRESHOLD: f64 = 39.0;

/// Replacement for outlier ages (training-data mean).
pub const AGE_IMPUTED_MEAN: f64 = 53.0;

/// Model column names, in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "gender",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "BMI",
    "pulse_pressure",
];

/// Ordered feature vector sent to the prediction service.
///
/// Position is meaningful: the model reads values by index in the order of
/// [`FEATURE_NAMES`]. Serializes as a plain JSON array; `NaN` becomes `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Pairs of `(column name, value)` in vector order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }

    #[must_use]
    pub fn age(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn systolic_bp(&self) -> f64 {
        self.0[2]
    }

    #[must_use]
    pub fn diastolic_bp(&self) -> f64 {
        self.0[3]
    }

    #[must_use]
    pub fn bmi(&self) -> f64 {
        self.0[9]
    }

    #[must_use]
    pub fn pulse_pressure(&self) -> f64 {
        self.0[10]
    }

    /// True when any value failed to parse.
    #[must_use]
    pub fn has_nan(&self) -> bool {
        self.0.iter().any(|v| v.is_nan())
    }
}

/// Compute the model's feature vector from raw form values.
///
/// Never fails. Unparsable text becomes `NaN` and flows through the
/// arithmetic unchanged; comparisons against `NaN` are false, so neither
/// cleaning rule fires on a `NaN` operand.
#[must_use]
pub fn compute_features(raw: &RawInput) -> FeatureVector {
    let mut age = parse_float(&raw.age);
    let height_m = parse_float(&raw.height) / 100.0;
    let weight = parse_float(&raw.weight);
    let mut ap_hi = parse_float(&raw.systolic_bp);
    let mut ap_lo = parse_float(&raw.diastolic_bp);
    let gender = parse_float(&raw.gender);
    let cholesterol = parse_float(&raw.cholesterol);
    let glucose = parse_float(&raw.glucose);
    let smoker = parse_float(&raw.smoker);
    let alcohol = parse_float(&raw.alcohol);
    let active = parse_float(&raw.active);

    if age < AGE_OUTLIER_THRESHOLD {
        age = AGE_IMPUTED_MEAN;
    }

    if ap_hi < ap_lo {
        std::mem::swap(&mut ap_hi, &mut ap_lo);
    }

    let bmi = weight / (height_m * height_m);
    let pulse_pressure = ap_hi - ap_lo;

    FeatureVector([
        age,
        gender,
        ap_hi,
        ap_lo,
        cholesterol,
        glucose,
        smoker,
        alcohol,
        active,
        bmi,
        pulse_pressure,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> RawInput {
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

    fn round2(v: f64) -> f64 {
        (v * 100.0).round() / 100.0
    }

    #[test]
    fn test_end_to_end_vector() {
        let features = compute_features(&sample());
        let rounded: Vec<f64> = features
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, v)| if i == 9 { round2(*v) } else { *v })
            .collect();
        assert_eq!(
            rounded,
            vec![45.0, 2.0, 130.0, 85.0, 1.0, 1.0, 0.0, 0.0, 1.0, 24.69, 45.0]
        );
    }

    #[test]
    fn test_only_age_changes_for_outlier() {
        let young = RawInput {
            age: "30".to_string(),
            ..sample()
        };
        let baseline = compute_features(&sample());
        let features = compute_features(&young);
        assert_eq!(features.age(), 53.0);
        assert_eq!(&features.as_slice()[1..], &baseline.as_slice()[1..]);
    }

    #[test]
    fn test_blood_pressure_swap() {
        let raw = RawInput {
            systolic_bp: "70".to_string(),
            diastolic_bp: "110".to_string(),
            ..sample()
        };
        let features = compute_features(&raw);
        assert_eq!(features.systolic_bp(), 110.0);
        assert_eq!(features.diastolic_bp(), 70.0);
        assert_eq!(features.pulse_pressure(), 40.0);

        let raw = RawInput {
            systolic_bp: "80".to_string(),
            diastolic_bp: "120".to_string(),
            ..sample()
        };
        let features = compute_features(&raw);
        assert_eq!(features.systolic_bp(), 120.0);
        assert_eq!(features.diastolic_bp(), 80.0);
        assert_eq!(features.pulse_pressure(), 40.0);
    }

    #[test]
    fn test_bmi_known_value() {
        let raw = RawInput {
            weight: "70".to_string(),
            height: "175".to_string(),
            ..sample()
        };
        assert!((compute_features(&raw).bmi() - 22.857).abs() < 1e-3);
    }

    #[test]
    fn test_unparsable_fields_become_nan() {
        let raw = RawInput {
            age: "abc".to_string(),
            weight: String::new(),
            systolic_bp: "x".to_string(),
            ..sample()
        };
        let features = compute_features(&raw);
        assert_eq!(features.as_slice().len(), FEATURE_COUNT);
        assert!(features.age().is_nan());
        assert!(features.bmi().is_nan());
        // NaN systolic: no swap, pulse pressure NaN
        assert!(features.systolic_bp().is_nan());
        assert_eq!(features.diastolic_bp(), 85.0);
        assert!(features.pulse_pressure().is_nan());
        assert!(features.has_nan());
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let raw = RawInput {
            age: String::new(),
            ..sample()
        };
        let json = serde_json::to_value(compute_features(&raw)).expect("serializes");
        let arr = json.as_array().expect("array");
        assert_eq!(arr.len(), FEATURE_COUNT);
        assert!(arr[0].is_null());
        assert_eq!(arr[1], 2.0);
    }

    #[test]
    fn test_named_order() {
        let features = compute_features(&sample());
        let names: Vec<&str> = features.named().map(|(n, _)| n).collect();
        assert_eq!(names, FEATURE_NAMES.to_vec());
        assert_eq!(features.named().nth(10), Some(("pulse_pressure", 45.0)));
    }

    proptest! {
        #[test]
        fn prop_age_below_threshold_is_imputed(age in -20.0f64..AGE_OUTLIER_THRESHOLD) {
            let raw = RawInput { age: age.to_string(), ..sample() };
            prop_assert_eq!(compute_features(&raw).age(), AGE_IMPUTED_MEAN);
        }

        #[test]
        fn prop_age_at_or_above_threshold_passes_through(age in AGE_OUTLIER_THRESHOLD..130.0f64) {
            let raw = RawInput { age: age.to_string(), ..sample() };
            prop_assert_eq!(compute_features(&raw).age(), age);
        }

        #[test]
        fn prop_pulse_pressure_non_negative(hi in 0.0f64..300.0, lo in 0.0f64..300.0) {
            let raw = RawInput {
                systolic_bp: hi.to_string(),
                diastolic_bp: lo.to_string(),
                ..sample()
            };
            let features = compute_features(&raw);
            prop_assert!(features.pulse_pressure() >= 0.0);
            prop_assert!(features.systolic_bp() >= features.diastolic_bp());
            prop_assert_eq!(features.systolic_bp(), hi.max(lo));
            prop_assert_eq!(features.diastolic_bp(), hi.min(lo));
        }

        #[test]
        fn prop_bmi_formula(weight in 1.0f64..300.0, height in 50.0f64..250.0) {
            let raw = RawInput {
                weight: weight.to_string(),
                height: height.to_string(),
                ..sample()
            };
            let height_m = height / 100.0;
            prop_assert_eq!(compute_features(&raw).bmi(), weight / (height_m * height_m));
        }
    }
}
