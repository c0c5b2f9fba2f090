//! Common types used across the service

use serde::{Deserialize, Serialize};

/// Earliest year accepted by the form
pub const YEAR_MIN: i32 = 1900;

/// Latest year accepted by the form
pub const YEAR_MAX: i32 = 2100;

/// One labeled line of the prediction summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryRow {
    #[serde(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl SummaryRow {
    pub fn new(feature: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            value: value.into(),
        }
    }
}

/// Format a measurement the way it was echoed back to the farmer:
/// shortest round-trip form, always with a fractional part (`800.0`, `25.5`).
pub fn format_measurement(value: f64) -> String {
    format!("{:?}", value)
}

/// Format a yield with two decimals (`31234.57`)
pub fn format_yield(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_measurement() {
        assert_eq!(format_measurement(800.0), "800.0");
        assert_eq!(format_measurement(25.5), "25.5");
        assert_eq!(format_measurement(-0.25), "-0.25");
        assert_eq!(format_measurement(1e16), "1e16");
        assert_eq!(format_measurement(1e-5), "1e-5");
    }

    #[test]
    fn test_format_yield() {
        assert_eq!(format_yield(31234.5678), "31234.57");
        assert_eq!(format_yield(40000.0), "40000.00");
    }
}
