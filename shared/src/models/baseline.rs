//! Reference average yields used for the comparison chart

use serde::Serialize;
use std::collections::HashMap;

use super::crop::Crop;

/// Baseline used for any crop missing from the table (hg/ha)
pub const DEFAULT_BASELINE_YIELD: f64 = 30000.0;

/// Reference average yield per crop, in hg/ha.
///
/// These are fixed reference values for visual comparison only; they do not
/// feed the prediction.
const CROP_AVERAGE_YIELDS: [(Crop, f64); 32] = [
    (Crop::Maize, 35000.0),
    (Crop::Wheat, 32000.0),
    (Crop::Rice, 40000.0),
    (Crop::Potatoes, 45000.0),
    (Crop::Barley, 30000.0),
    (Crop::Soybeans, 28000.0),
    (Crop::Tomato, 50000.0),
    (Crop::Onion, 42000.0),
    (Crop::Carrot, 41000.0),
    (Crop::Cabbage, 43000.0),
    (Crop::Spinach, 39000.0),
    (Crop::Peas, 37000.0),
    (Crop::Cauliflower, 42000.0),
    (Crop::Apple, 25000.0),
    (Crop::Banana, 60000.0),
    (Crop::Mango, 55000.0),
    (Crop::Orange, 48000.0),
    (Crop::Grapes, 52000.0),
    (Crop::Pineapple, 58000.0),
    (Crop::Papaya, 54000.0),
    (Crop::Strawberry, 47000.0),
    (Crop::Watermelon, 62000.0),
    (Crop::Pumpkin, 44000.0),
    (Crop::Cucumber, 43000.0),
    (Crop::Chili, 36000.0),
    (Crop::Brinjal, 41000.0),
    (Crop::Lettuce, 35000.0),
    (Crop::Garlic, 34000.0),
    (Crop::Ginger, 33000.0),
    (Crop::Sugarcane, 70000.0),
    (Crop::Cotton, 29000.0),
    (Crop::Other, 30000.0),
];

/// Immutable crop -> baseline yield lookup
#[derive(Debug, Clone, Serialize)]
pub struct BaselineYieldTable {
    entries: HashMap<Crop, f64>,
    default_yield: f64,
}

impl BaselineYieldTable {
    /// Build a table from explicit entries
    pub fn new(entries: impl IntoIterator<Item = (Crop, f64)>, default_yield: f64) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            default_yield,
        }
    }

    /// Baseline for a known crop
    pub fn for_crop(&self, crop: Crop) -> f64 {
        self.entries.get(&crop).copied().unwrap_or(self.default_yield)
    }

    /// Baseline for a crop given by name; unknown names fall back to the default
    pub fn lookup(&self, crop_name: &str) -> f64 {
        crop_name
            .parse::<Crop>()
            .map(|crop| self.for_crop(crop))
            .unwrap_or(self.default_yield)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BaselineYieldTable {
    fn default() -> Self {
        Self::new(CROP_AVERAGE_YIELDS, DEFAULT_BASELINE_YIELD)
    }
}
