//! Crop catalogue

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Crop types selectable in the prediction form.
///
/// The order matches the selection list shown to farmers; `Other` is always last.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Crop {
    #[default]
    Maize,
    Wheat,
    Rice,
    Potatoes,
    Barley,
    Soybeans,
    Tomato,
    Onion,
    Carrot,
    Cabbage,
    Spinach,
    Peas,
    Cauliflower,
    Apple,
    Banana,
    Mango,
    Orange,
    Grapes,
    Pineapple,
    Papaya,
    Strawberry,
    Watermelon,
    Pumpkin,
    Cucumber,
    Chili,
    Brinjal,
    Lettuce,
    Garlic,
    Ginger,
    Sugarcane,
    Cotton,
    Other,
}

impl Crop {
    /// Every crop in form order
    pub const ALL: [Crop; 32] = [
        Crop::Maize,
        Crop::Wheat,
        Crop::Rice,
        Crop::Potatoes,
        Crop::Barley,
        Crop::Soybeans,
        Crop::Tomato,
        Crop::Onion,
        Crop::Carrot,
        Crop::Cabbage,
        Crop::Spinach,
        Crop::Peas,
        Crop::Cauliflower,
        Crop::Apple,
        Crop::Banana,
        Crop::Mango,
        Crop::Orange,
        Crop::Grapes,
        Crop::Pineapple,
        Crop::Papaya,
        Crop::Strawberry,
        Crop::Watermelon,
        Crop::Pumpkin,
        Crop::Cucumber,
        Crop::Chili,
        Crop::Brinjal,
        Crop::Lettuce,
        Crop::Garlic,
        Crop::Ginger,
        Crop::Sugarcane,
        Crop::Cotton,
        Crop::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Crop::Maize => "Maize",
            Crop::Wheat => "Wheat",
            Crop::Rice => "Rice",
            Crop::Potatoes => "Potatoes",
            Crop::Barley => "Barley",
            Crop::Soybeans => "Soybeans",
            Crop::Tomato => "Tomato",
            Crop::Onion => "Onion",
            Crop::Carrot => "Carrot",
            Crop::Cabbage => "Cabbage",
            Crop::Spinach => "Spinach",
            Crop::Peas => "Peas",
            Crop::Cauliflower => "Cauliflower",
            Crop::Apple => "Apple",
            Crop::Banana => "Banana",
            Crop::Mango => "Mango",
            Crop::Orange => "Orange",
            Crop::Grapes => "Grapes",
            Crop::Pineapple => "Pineapple",
            Crop::Papaya => "Papaya",
            Crop::Strawberry => "Strawberry",
            Crop::Watermelon => "Watermelon",
            Crop::Pumpkin => "Pumpkin",
            Crop::Cucumber => "Cucumber",
            Crop::Chili => "Chili",
            Crop::Brinjal => "Brinjal",
            Crop::Lettuce => "Lettuce",
            Crop::Garlic => "Garlic",
            Crop::Ginger => "Ginger",
            Crop::Sugarcane => "Sugarcane",
            Crop::Cotton => "Cotton",
            Crop::Other => "Other",
        }
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a crop name is not part of the catalogue
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown crop type: {0}")]
pub struct UnknownCrop(pub String);

impl FromStr for Crop {
    type Err = UnknownCrop;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Crop::ALL
            .iter()
            .copied()
            .find(|crop| crop.name() == s)
            .ok_or_else(|| UnknownCrop(s.to_string()))
    }
}
