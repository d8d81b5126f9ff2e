//! Feature normalization.
//!
//! Submissions arrive loosely typed: every behavioral field may be a JSON
//! number or a numeric string. This module coerces and bound-checks them
//! into a [`FeatureVector`]. Media payloads never pass through here; they
//! travel alongside the features as opaque bytes.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::models::{FeatureVector, Gender};

/// One assessment submission as it arrives from the outside world.
/// Missing fields deserialize as `Value::Null` and fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAssessment {
    pub age: Value,
    pub gender: Value,
    pub sleep_hours: Value,
    pub exercise_frequency: Value,
    pub academic_pressure: Value,
    pub financial_pressure: Value,
    pub study_hours: Value,
    pub screen_time: Value,
}

/// Validate and coerce a raw submission. Field names in errors use the
/// wire spelling so callers can surface them verbatim.
pub fn normalize(raw: &RawAssessment) -> Result<FeatureVector, ValidationError> {
    Ok(FeatureVector {
        age: whole_number("age", &raw.age, 10)?,
        gender: gender("gender", &raw.gender)?,
        sleep_hours: bounded("sleepHours", &raw.sleep_hours, 0.0, 24.0)?,
        exercise_frequency: bounded("exerciseFrequency", &raw.exercise_frequency, 0.0, 12.0)?,
        academic_pressure: numeric("academicPressure", &raw.academic_pressure)?,
        financial_pressure: numeric("financialPressure", &raw.financial_pressure)?,
        study_hours: bounded("studyHours", &raw.study_hours, 0.0, 12.0)?,
        screen_time: bounded("screenTime", &raw.screen_time, 0.0, 12.0)?,
    })
}

fn numeric(field: &'static str, value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null => return Err(ValidationError::new(field, "value is missing")),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::new(field, format!("{value} is not a number"))),
    }
}

fn bounded(
    field: &'static str,
    value: &Value,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    let v = numeric(field, value)?;
    if v < min || v > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {min} and {max}"),
        ));
    }
    Ok(v)
}

fn whole_number(field: &'static str, value: &Value, min: i32) -> Result<i32, ValidationError> {
    let v = numeric(field, value)?;
    if v.fract() != 0.0 {
        return Err(ValidationError::new(field, "must be a whole number"));
    }
    if v < f64::from(min) {
        return Err(ValidationError::new(field, format!("must be at least {min}")));
    }
    if v > f64::from(i32::MAX) {
        return Err(ValidationError::new(field, "is out of range"));
    }
    Ok(v as i32)
}

/// Unknown gender values are rejected rather than defaulted; see DESIGN.md.
fn gender(field: &'static str, value: &Value) -> Result<Gender, ValidationError> {
    let text = match value {
        Value::String(s) => s,
        Value::Null => return Err(ValidationError::new(field, "value is missing")),
        other => {
            return Err(ValidationError::new(
                field,
                format!("{other} is not a gender label"),
            ))
        }
    };
    Gender::parse(text).ok_or_else(|| {
        ValidationError::new(field, format!("`{text}` is not one of male, female, other"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_submission() -> RawAssessment {
        serde_json::from_value(json!({
            "age": 21,
            "gender": "Female",
            "sleepHours": "7.5",
            "exerciseFrequency": 3,
            "academicPressure": 6.5,
            "financialPressure": "4",
            "studyHours": 5,
            "screenTime": 6
        }))
        .unwrap()
    }

    #[test]
    fn coerces_numbers_and_numeric_strings() {
        let features = normalize(&raw_submission()).unwrap();
        assert_eq!(features.age, 21);
        assert_eq!(features.gender, Gender::Female);
        assert_eq!(features.sleep_hours, 7.5);
        assert_eq!(features.financial_pressure, 4.0);
    }

    #[test]
    fn sleep_bounds_are_inclusive() {
        let mut raw = raw_submission();
        raw.sleep_hours = json!(0);
        assert!(normalize(&raw).is_ok());
        raw.sleep_hours = json!(24);
        assert!(normalize(&raw).is_ok());
        raw.sleep_hours = json!(25);
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.field, "sleepHours");
    }

    #[test]
    fn non_numeric_input_names_the_field() {
        let mut raw = raw_submission();
        raw.study_hours = json!("lots");
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.field, "studyHours");
    }

    #[test]
    fn missing_field_is_rejected() {
        let raw: RawAssessment = serde_json::from_value(json!({
            "age": 21,
            "gender": "female"
        }))
        .unwrap();
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.field, "sleepHours");
        assert!(err.reason.contains("missing"));
    }

    #[test]
    fn gender_is_lowercased_not_defaulted() {
        let mut raw = raw_submission();
        raw.gender = json!("MALE");
        assert_eq!(normalize(&raw).unwrap().gender, Gender::Male);

        raw.gender = json!("nonbinary");
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.field, "gender");

        raw.gender = json!(3);
        assert!(normalize(&raw).is_err());
    }

    #[test]
    fn age_must_be_a_whole_number_of_at_least_ten() {
        let mut raw = raw_submission();
        raw.age = json!(21.5);
        assert_eq!(normalize(&raw).unwrap_err().field, "age");
        raw.age = json!(9);
        assert!(normalize(&raw).is_err());
        raw.age = json!(10);
        assert_eq!(normalize(&raw).unwrap().age, 10);
        raw.age = json!("34");
        assert_eq!(normalize(&raw).unwrap().age, 34);
    }

    #[test]
    fn infinite_and_nan_strings_are_rejected() {
        let mut raw = raw_submission();
        raw.academic_pressure = json!("inf");
        assert!(normalize(&raw).is_err());
        raw.academic_pressure = json!("NaN");
        assert!(normalize(&raw).is_err());
    }
}
