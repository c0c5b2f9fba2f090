//! Feature record submitted to the yield predictor

use serde::Serialize;

use super::crop::Crop;
use crate::validation::{validate_year, NumericInputs, ValidationError};

/// Structured input for one prediction.
///
/// Built fresh per request and never mutated afterwards. Serializes with the
/// column names the trained pipeline was fitted on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    #[serde(rename = "Area")]
    area: String,
    #[serde(rename = "Item")]
    item: Crop,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "average_rain_fall_mm_per_year")]
    rainfall_mm: f64,
    #[serde(rename = "pesticides_tonnes")]
    pesticide_usage: f64,
    #[serde(rename = "avg_temp")]
    avg_temp: f64,
}

impl FeatureRecord {
    /// Assemble a record from validated measurements. The year must lie in
    /// the form bounds.
    pub fn new(
        area: impl Into<String>,
        item: Crop,
        year: i32,
        inputs: NumericInputs,
    ) -> Result<Self, ValidationError> {
        validate_year(year)?;
        Ok(Self {
            area: area.into(),
            item,
            year,
            rainfall_mm: inputs.rainfall_mm,
            pesticide_usage: inputs.pesticide_usage,
            avg_temp: inputs.avg_temp,
        })
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn item(&self) -> Crop {
        self.item
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn rainfall_mm(&self) -> f64 {
        self.rainfall_mm
    }

    pub fn pesticide_usage(&self) -> f64 {
        self.pesticide_usage
    }

    pub fn avg_temp(&self) -> f64 {
        self.avg_temp
    }

    /// Numeric columns in pipeline order: year, rainfall, pesticide, temperature
    pub fn numeric_features(&self) -> [f64; 4] {
        [
            f64::from(self.year),
            self.rainfall_mm,
            self.pesticide_usage,
            self.avg_temp,
        ]
    }
}
