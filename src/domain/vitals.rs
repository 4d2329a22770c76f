//! Raw vitals as entered in the assessment form.
//!
//! Every value is kept as the text the user typed or selected. Conversion to
//! numbers happens in the feature pipeline through [`parse_float`], which is
//! deliberately permissive: bad text becomes `NaN`, it never fails.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Input widget kind for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free numeric text with a placeholder example.
    Numeric { placeholder: &'static str },
    /// Fixed set of `(value, label)` options; the widget only cycles these.
    Choice { options: &'static [(&'static str, &'static str)] },
}

const GENDER_OPTIONS: &[(&str, &str)] = &[("1", "Female"), ("2", "Male")];
const LEVEL_OPTIONS: &[(&str, &str)] = &[
    ("1", "Normal"),
    ("2", "Above Normal"),
    ("3", "Well Above Normal"),
];
const NO_YES_OPTIONS: &[(&str, &str)] = &[("0", "No"), ("1", "Yes")];
const YES_NO_OPTIONS: &[(&str, &str)] = &[("1", "Yes"), ("0", "No")];

/// The eleven vitals collected by the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Age,
    Gender,
    Weight,
    Height,
    SystolicBp,
    DiastolicBp,
    Cholesterol,
    Glucose,
    Smoker,
    Alcohol,
    Active,
}

impl Field {
    /// All fields in the order the form presents them.
    pub const ALL: [Field; 11] = [
        Field::Age,
        Field::Gender,
        Field::Weight,
        Field::Height,
        Field::SystolicBp,
        Field::DiastolicBp,
        Field::Cholesterol,
        Field::Glucose,
        Field::Smoker,
        Field::Alcohol,
        Field::Active,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age (Years)",
            Self::Gender => "Gender",
            Self::Weight => "Weight (kg)",
            Self::Height => "Height (cm)",
            Self::SystolicBp => "Systolic BP (mmHg)",
            Self::DiastolicBp => "Diastolic BP (mmHg)",
            Self::Cholesterol => "Cholesterol Level",
            Self::Glucose => "Glucose Level",
            Self::Smoker => "Smoker",
            Self::Alcohol => "Alcohol Intake",
            Self::Active => "Physically Active",
        }
    }

    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Age => FieldKind::Numeric { placeholder: "e.g. 45" },
            Self::Weight => FieldKind::Numeric { placeholder: "e.g. 70" },
            Self::Height => FieldKind::Numeric { placeholder: "e.g. 175" },
            Self::SystolicBp => FieldKind::Numeric { placeholder: "e.g. 120" },
            Self::DiastolicBp => FieldKind::Numeric { placeholder: "e.g. 80" },
            Self::Gender => FieldKind::Choice { options: GENDER_OPTIONS },
            Self::Cholesterol | Self::Glucose => FieldKind::Choice { options: LEVEL_OPTIONS },
            Self::Smoker | Self::Alcohol => FieldKind::Choice { options: NO_YES_OPTIONS },
            Self::Active => FieldKind::Choice { options: YES_NO_OPTIONS },
        }
    }
}

/// Raw form values, one text buffer per field.
///
/// Serialized with the model's column names (`ap_hi`, `gluc`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub age: String,
    pub gender: String,
    #[serde(rename = "ap_hi")]
    pub systolic_bp: String,
    #[serde(rename = "ap_lo")]
    pub diastolic_bp: String,
    pub cholesterol: String,
    #[serde(rename = "gluc")]
    pub glucose: String,
    #[serde(rename = "smoke")]
    pub smoker: String,
    #[serde(rename = "alco")]
    pub alcohol: String,
    pub active: String,
    pub weight: String,
    pub height: String,
}

impl RawInput {
    /// A fresh form: numeric fields empty, selectors at their initial option.
    #[must_use]
    pub fn with_form_defaults() -> Self {
        Self {
            gender: "1".to_string(),
            cholesterol: "1".to_string(),
            glucose: "1".to_string(),
            smoker: "0".to_string(),
            alcohol: "0".to_string(),
            active: "0".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Age => &self.age,
            Field::Gender => &self.gender,
            Field::Weight => &self.weight,
            Field::Height => &self.height,
            Field::SystolicBp => &self.systolic_bp,
            Field::DiastolicBp => &self.diastolic_bp,
            Field::Cholesterol => &self.cholesterol,
            Field::Glucose => &self.glucose,
            Field::Smoker => &self.smoker,
            Field::Alcohol => &self.alcohol,
            Field::Active => &self.active,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Age => &mut self.age,
            Field::Gender => &mut self.gender,
            Field::Weight => &mut self.weight,
            Field::Height => &mut self.height,
            Field::SystolicBp => &mut self.systolic_bp,
            Field::DiastolicBp => &mut self.diastolic_bp,
            Field::Cholesterol => &mut self.cholesterol,
            Field::Glucose => &mut self.glucose,
            Field::Smoker => &mut self.smoker,
            Field::Alcohol => &mut self.alcohol,
            Field::Active => &mut self.active,
        }
    }

    /// BMI for display, computed from the raw weight and height text.
    ///
    /// `None` when either field is empty.
    #[must_use]
    pub fn display_bmi(&self) -> Option<f64> {
        if self.weight.is_empty() || self.height.is_empty() {
            return None;
        }
        let height_m = parse_float(&self.height) / 100.0;
        Some(parse_float(&self.weight) / height_m.powi(2))
    }
}

impl Zeroize for RawInput {
    fn zeroize(&mut self) {
        for field in Field::ALL {
            self.get_mut(field).zeroize();
        }
    }
}

/// Parse the longest numeric prefix of `text`, yielding `NaN` when there is none.
///
/// Leading whitespace (including a byte-order mark) is skipped and trailing
/// garbage ignored, so `"45kg"`
/// reads as 45. An exponent only counts when digits follow it (`"1e"` is 1).
/// `Infinity` with an optional sign is accepted; nothing else non-numeric is.
#[must_use]
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_float("45"), 45.0);
        assert_eq!(parse_float("-12.5"), -12.5);
        assert_eq!(parse_float("+7"), 7.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("2.5E-1"), 0.25);
    }

    #[test]
    fn test_parse_prefix_and_whitespace() {
        assert_eq!(parse_float("  80"), 80.0);
        assert_eq!(parse_float("45kg"), 45.0);
        assert_eq!(parse_float("1.2.3"), 1.2);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("1e+"), 1.0);
        assert_eq!(parse_float("120-"), 120.0);
    }

    #[test]
    fn test_parse_skips_unicode_whitespace_and_bom() {
        assert_eq!(parse_float("\u{feff}12"), 12.0);
        assert_eq!(parse_float("\u{a0}\t-.5"), -0.5);
        assert_eq!(parse_float("1.e5"), 100000.0);
        assert_eq!(parse_float("1e5.5"), 100000.0);
        assert!(parse_float("+-5").is_nan());
        assert_eq!(parse_float("1e400"), f64::INFINITY);
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float("inf").is_nan());
    }

    #[test]
    fn test_parse_garbage_is_nan() {
        for text in ["", " ", "-", ".", "abc", "e5", "+.", "NaN"] {
            assert!(parse_float(text).is_nan(), "{text:?} should be NaN");
        }
    }

    #[test]
    fn test_form_defaults() {
        let raw = RawInput::with_form_defaults();
        assert_eq!(raw.gender, "1");
        assert_eq!(raw.active, "0");
        assert!(raw.age.is_empty());
        assert!(raw.display_bmi().is_none());
    }

    #[test]
    fn test_get_mut_targets_matching_field() {
        let mut raw = RawInput::default();
        for (i, field) in Field::ALL.iter().enumerate() {
            *raw.get_mut(*field) = i.to_string();
        }
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(raw.get(*field), i.to_string());
        }
    }

    #[test]
    fn test_display_bmi() {
        let raw = RawInput {
            weight: "70".to_string(),
            height: "175".to_string(),
            ..RawInput::default()
        };
        let bmi = raw.display_bmi().expect("weight and height present");
        assert!((bmi - 22.857).abs() < 1e-3);
    }

    #[test]
    fn test_zeroize_clears_all_fields() {
        let mut raw = RawInput::with_form_defaults();
        raw.age = "45".to_string();
        raw.zeroize();
        assert!(Field::ALL.iter().all(|f| raw.get(*f).is_empty()));
    }

    #[test]
    fn test_serde_uses_model_column_names() {
        let raw = RawInput {
            systolic_bp: "130".to_string(),
            glucose: "2".to_string(),
            ..RawInput::default()
        };
        let json = serde_json::to_value(&raw).expect("serializes");
        assert_eq!(json["ap_hi"], "130");
        assert_eq!(json["gluc"], "2");
    }
}
