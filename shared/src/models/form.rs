//! Prediction form state
//!
//! The form is rendered either live (showing the usual prefilled values) or
//! right after a reset (showing the reset defaults). The mode is passed in
//! explicitly by whoever renders the form.

use serde::{Deserialize, Serialize};

use super::crop::Crop;
use crate::types::{YEAR_MAX, YEAR_MIN};

/// Default year preselected in the form
pub const DEFAULT_FORM_YEAR: i32 = 2025;

/// Which set of field values the form should show
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Live,
    Reset,
}

/// Everything a client needs to draw the prediction form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub item: Crop,
    pub area: String,
    pub year: i32,
    pub rainfall: String,
    pub pesticide: String,
    pub avg_temp: String,
    pub crop_options: Vec<Crop>,
    pub year_min: i32,
    pub year_max: i32,
}

impl FormState {
    pub fn for_mode(mode: FormMode) -> Self {
        let area = match mode {
            FormMode::Live => "Albania",
            FormMode::Reset => "India",
        };

        Self {
            mode,
            item: Crop::Maize,
            area: area.to_string(),
            year: DEFAULT_FORM_YEAR,
            rainfall: String::new(),
            pesticide: String::new(),
            avg_temp: String::new(),
            crop_options: Crop::ALL.to_vec(),
            year_min: YEAR_MIN,
            year_max: YEAR_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_defaults() {
        let state = FormState::for_mode(FormMode::Live);
        assert_eq!(state.area, "Albania");
        assert_eq!(state.item, Crop::Maize);
        assert_eq!(state.year, 2025);
        assert!(state.rainfall.is_empty());
        assert_eq!(state.crop_options.len(), 32);
        assert_eq!(state.crop_options.last(), Some(&Crop::Other));
    }

    #[test]
    fn test_reset_defaults() {
        let state = FormState::for_mode(FormMode::Reset);
        assert_eq!(state.mode, FormMode::Reset);
        assert_eq!(state.area, "India");
        assert_eq!(state.item, Crop::Maize);
        assert!(state.pesticide.is_empty());
        assert!(state.avg_temp.is_empty());
        assert_eq!((state.year_min, state.year_max), (1900, 2100));
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: FormMode = serde_json::from_str("\"reset\"").unwrap();
        assert_eq!(mode, FormMode::Reset);
        assert_eq!(FormMode::default(), FormMode::Live);
    }
}
