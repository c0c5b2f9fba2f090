//! WebAssembly module for the Crop Yield Prediction form
//!
//! Provides client-side computation for:
//! - Numeric input validation
//! - Recommendation tiers
//! - Baseline yield lookup
//! - Form defaults

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("crop-yield-wasm ready"));
}

/// Classify a predicted yield into its recommendation tier name
#[wasm_bindgen]
pub fn classify_recommendation(predicted_yield: f64) -> String {
    format!("{}", classify_yield(predicted_yield))
}

/// Recommendation message shown for a predicted yield
#[wasm_bindgen]
pub fn recommendation_message(predicted_yield: f64) -> String {
    classify_yield(predicted_yield).message().to_string()
}

/// Average yield for a crop name (hg/ha)
#[wasm_bindgen]
pub fn baseline_yield_for(crop_name: &str) -> f64 {
    BaselineYieldTable::default().lookup(crop_name)
}

/// Check the three free-text measurements.
///
/// Returns the error message, or `None` when all three parse.
#[wasm_bindgen]
pub fn validate_numeric_inputs(rainfall: &str, pesticide: &str, avg_temp: &str) -> Option<String> {
    parse_numeric_inputs(rainfall, pesticide, avg_temp)
        .err()
        .map(|e| e.to_string())
}

/// Validate a year against the accepted range
#[wasm_bindgen]
pub fn is_valid_year(year: i32) -> bool {
    validate_year(year).is_ok()
}

/// Crop names in form order
#[wasm_bindgen]
pub fn crop_options() -> js_sys::Array {
    Crop::ALL
        .iter()
        .map(|crop| JsValue::from_str(crop.name()))
        .collect()
}

/// Form field values for `"live"` or `"reset"`, as JSON
#[wasm_bindgen]
pub fn form_state(mode: &str) -> Result<String, JsValue> {
    let mode = parse_form_mode(mode).ok_or_else(|| JsValue::from_str("mode must be live or reset"))?;
    serde_json::to_string(&FormState::for_mode(mode))
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize form state: {}", e)))
}

fn parse_form_mode(mode: &str) -> Option<FormMode> {
    match mode {
        "live" => Some(FormMode::Live),
        "reset" => Some(FormMode::Reset),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_recommendation() {
        assert_eq!(classify_recommendation(45000.0), "Excellent");
        assert_eq!(classify_recommendation(40000.0), "Good");
        assert_eq!(classify_recommendation(20000.0), "Below average");
    }

    #[test]
    fn test_baseline_lookup() {
        assert_eq!(baseline_yield_for("Maize"), 35000.0);
        assert_eq!(baseline_yield_for("Quinoa"), 30000.0);
    }

    #[test]
    fn test_validate_numeric_inputs() {
        assert!(validate_numeric_inputs("800", "150", "25").is_none());
        assert_eq!(
            validate_numeric_inputs("800", "", "25").as_deref(),
            Some("Please enter valid numeric values for rainfall, pesticide usage, and temperature.")
        );
    }

    #[test]
    fn test_year_bounds() {
        assert!(is_valid_year(1900));
        assert!(is_valid_year(2100));
        assert!(!is_valid_year(2101));
    }

    #[test]
    fn test_form_state_reset() {
        let json = form_state("reset").unwrap();
        let state: FormState = serde_json::from_str(&json).unwrap();
        assert_eq!(state.area, "India");
        assert_eq!(parse_form_mode("paused"), None);
    }
}
