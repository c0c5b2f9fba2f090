//! Validation utilities for the Crop Yield Prediction service
//!
//! The three weather/farm measurements arrive as free text from the form and
//! must all convert to numbers before a prediction is attempted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{YEAR_MAX, YEAR_MIN};

/// Message shown when any numeric field fails to parse
pub const NUMERIC_INPUT_MESSAGE: &str =
    "Please enter valid numeric values for rainfall, pesticide usage, and temperature.";

/// Errors raised while validating a prediction request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of rainfall, pesticide usage or temperature is not a number.
    /// `field` names the first offending input.
    #[error("Please enter valid numeric values for rainfall, pesticide usage, and temperature.")]
    NonNumeric { field: &'static str },

    #[error("Year must be between 1900 and 2100, got {year}")]
    YearOutOfRange { year: i32 },

    #[error("Unknown crop type: {0}")]
    UnknownCrop(String),
}

impl ValidationError {
    /// Name of the request field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NonNumeric { field } => *field,
            ValidationError::YearOutOfRange { .. } => "year",
            ValidationError::UnknownCrop(_) => "item",
        }
    }
}

/// Parsed rainfall, pesticide usage and average temperature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericInputs {
    pub rainfall_mm: f64,
    pub pesticide_usage: f64,
    pub avg_temp: f64,
}

/// Parse one free-text measurement. Surrounding whitespace is ignored;
/// non-finite values (`nan`, `inf`) and digit separators (`1_000`) are rejected.
pub fn parse_measurement(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Convert the three free-text measurements to numbers.
///
/// Fails as a whole if any of them does not parse; no range checks are applied.
pub fn parse_numeric_inputs(
    raw_rain: &str,
    raw_pesticide: &str,
    raw_temp: &str,
) -> Result<NumericInputs, ValidationError> {
    let rainfall_mm =
        parse_measurement(raw_rain).ok_or(ValidationError::NonNumeric { field: "rainfall" })?;
    let pesticide_usage = parse_measurement(raw_pesticide)
        .ok_or(ValidationError::NonNumeric { field: "pesticide" })?;
    let avg_temp =
        parse_measurement(raw_temp).ok_or(ValidationError::NonNumeric { field: "avg_temp" })?;

    Ok(NumericInputs {
        rainfall_mm,
        pesticide_usage,
        avg_temp,
    })
}

/// Validate the year lies within the form bounds (inclusive)
pub fn validate_year(year: i32) -> Result<(), ValidationError> {
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(ValidationError::YearOutOfRange { year });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_numeric_inputs_valid() {
        let inputs = parse_numeric_inputs("800", "150", "25").unwrap();
        assert_eq!(inputs.rainfall_mm, 800.0);
        assert_eq!(inputs.pesticide_usage, 150.0);
        assert_eq!(inputs.avg_temp, 25.0);
    }

    #[test]
    fn test_parse_accepts_decimals_signs_and_exponents() {
        let inputs = parse_numeric_inputs(" 1200.5 ", "-3", "2.5e1").unwrap();
        assert_eq!(inputs.rainfall_mm, 1200.5);
        assert_eq!(inputs.pesticide_usage, -3.0);
        assert_eq!(inputs.avg_temp, 25.0);
    }

    #[test]
    fn test_parse_rejects_each_field() {
        assert_eq!(
            parse_numeric_inputs("abc", "150", "25"),
            Err(ValidationError::NonNumeric { field: "rainfall" })
        );
        assert_eq!(
            parse_numeric_inputs("800", "", "25"),
            Err(ValidationError::NonNumeric { field: "pesticide" })
        );
        assert_eq!(
            parse_numeric_inputs("800", "150", "25C"),
            Err(ValidationError::NonNumeric { field: "avg_temp" })
        );
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(parse_numeric_inputs("nan", "150", "25").is_err());
        assert!(parse_numeric_inputs("800", "inf", "25").is_err());
    }

    #[test]
    fn test_parse_rejects_digit_separators() {
        assert_eq!(parse_measurement("1_000"), None);
        assert_eq!(parse_measurement("1000"), Some(1000.0));
    }

    #[test]
    fn test_error_message_is_user_facing() {
        let err = parse_numeric_inputs("", "", "").unwrap_err();
        assert_eq!(err.to_string(), NUMERIC_INPUT_MESSAGE);
    }

    #[test]
    fn test_validate_year_bounds() {
        assert!(validate_year(1900).is_ok());
        assert!(validate_year(2025).is_ok());
        assert!(validate_year(2100).is_ok());
        assert_eq!(
            validate_year(1899),
            Err(ValidationError::YearOutOfRange { year: 1899 })
        );
        assert!(validate_year(2101).is_err());
    }

    proptest! {
        #[test]
        fn prop_any_finite_number_parses(rain in -1.0e6f64..1.0e6, pest in 0.0f64..1.0e5, temp in -50.0f64..60.0) {
            let inputs = parse_numeric_inputs(&rain.to_string(), &pest.to_string(), &temp.to_string()).unwrap();
            prop_assert_eq!(inputs.rainfall_mm, rain);
            prop_assert_eq!(inputs.pesticide_usage, pest);
            prop_assert_eq!(inputs.avg_temp, temp);
        }

        #[test]
        fn prop_alphabetic_input_is_rejected(word in "[a-zA-Z]{1,8}") {
            // "inf", "nan" and friends parse but are not finite
            prop_assert!(parse_numeric_inputs(&word, "1", "1").is_err());
        }
    }
}
