//! Prediction orchestration
//!
//! Validate the form input, build the feature record, call the predictor
//! once, and derive the recommendation tier and comparison baseline.

use serde::{Deserialize, Serialize};
use shared::{
    parse_numeric_inputs, BaselineYieldTable, Crop, FeatureRecord, RecommendationThresholds,
    RecommendationTier, ValidationError,
};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::predictor::YieldPredictor;

/// Prediction request as submitted by the form.
///
/// The three measurements stay free text until validated.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PredictionRequest {
    #[validate(length(min = 1, message = "Area is required"))]
    pub area: String,
    pub item: String,
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub year: i32,
    pub rainfall: String,
    pub pesticide: String,
    pub avg_temp: String,
}

/// Prediction plus everything derived from it
#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutcome {
    pub record: FeatureRecord,
    pub predicted_yield: f64,
    pub tier: RecommendationTier,
    pub baseline_yield: f64,
}

/// Score one record with the loaded predictor.
///
/// Fails with `PredictorUnavailable` when no predictor was loaded and with
/// `PredictionFailure` when the predictor errors. Never retries.
pub fn predict_yield(
    predictor: Option<&dyn YieldPredictor>,
    record: &FeatureRecord,
) -> AppResult<f64> {
    let predictor = predictor.ok_or(AppError::PredictorUnavailable)?;
    let predicted = predictor.predict(record)?;
    Ok(predicted)
}

/// Prediction orchestrator
#[derive(Clone)]
pub struct PredictionService {
    predictor: Option<Arc<dyn YieldPredictor>>,
    baselines: Arc<BaselineYieldTable>,
    thresholds: RecommendationThresholds,
}

impl PredictionService {
    pub fn new(
        predictor: Option<Arc<dyn YieldPredictor>>,
        baselines: Arc<BaselineYieldTable>,
        thresholds: RecommendationThresholds,
    ) -> Self {
        Self {
            predictor,
            baselines,
            thresholds,
        }
    }

    /// Turn a raw request into a feature record, rejecting bad input
    pub fn build_record(request: &PredictionRequest) -> AppResult<FeatureRecord> {
        request.validate()?;

        let item: Crop = request
            .item
            .parse()
            .map_err(|_| ValidationError::UnknownCrop(request.item.clone()))?;
        let inputs =
            parse_numeric_inputs(&request.rainfall, &request.pesticide, &request.avg_temp)?;

        Ok(FeatureRecord::new(
            request.area.clone(),
            item,
            request.year,
            inputs,
        )?)
    }

    /// Validate, predict and derive for one request
    pub fn run(&self, request: &PredictionRequest) -> AppResult<PredictionOutcome> {
        let record = Self::build_record(request)?;
        let predicted_yield = predict_yield(self.predictor.as_deref(), &record)?;

        tracing::debug!(
            "Predicted {:.2} hg/ha for {} in {} ({})",
            predicted_yield,
            record.item(),
            record.area(),
            record.year()
        );

        Ok(self.derive(record, predicted_yield))
    }

    /// Recommendation tier and baseline for a prediction
    pub fn derive(&self, record: FeatureRecord, predicted_yield: f64) -> PredictionOutcome {
        let tier = RecommendationTier::classify(predicted_yield, &self.thresholds);
        let baseline_yield = self.baselines.lookup(record.item().name());

        PredictionOutcome {
            record,
            predicted_yield,
            tier,
            baseline_yield,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::predictor::PredictorError;

    struct Fixed(f64);

    impl YieldPredictor for Fixed {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, PredictorError> {
            Ok(self.0)
        }
    }

    struct Failing;

    impl YieldPredictor for Failing {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, PredictorError> {
            Err(PredictorError::Model("shape mismatch".to_string()))
        }
    }

    fn request() -> PredictionRequest {
        PredictionRequest {
            area: "Albania".to_string(),
            item: "Maize".to_string(),
            year: 2025,
            rainfall: "800".to_string(),
            pesticide: "150".to_string(),
            avg_temp: "25".to_string(),
        }
    }

    fn service(predictor: Option<Arc<dyn YieldPredictor>>) -> PredictionService {
        PredictionService::new(
            predictor,
            Arc::new(BaselineYieldTable::default()),
            RecommendationThresholds::default(),
        )
    }

    #[test]
    fn test_run_derives_tier_and_baseline() {
        let outcome = service(Some(Arc::new(Fixed(30000.0)))).run(&request()).unwrap();
        assert_eq!(outcome.tier, RecommendationTier::Good);
        assert_eq!(outcome.baseline_yield, 35000.0);
        assert_eq!(outcome.record.rainfall_mm(), 800.0);
    }

    #[test]
    fn test_missing_predictor_is_unavailable() {
        let err = service(None).run(&request()).unwrap_err();
        assert!(matches!(err, AppError::PredictorUnavailable));
    }

    #[test]
    fn test_predictor_error_is_prediction_failure() {
        let err = service(Some(Arc::new(Failing))).run(&request()).unwrap_err();
        assert!(matches!(err, AppError::PredictionFailure(_)));
    }

    #[test]
    fn test_validation_runs_before_availability_check() {
        let mut bad = request();
        bad.avg_temp = "warm".to_string();
        let err = service(None).run(&bad).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unknown_crop_rejected() {
        let mut bad = request();
        bad.item = "Coffee".to_string();
        let err = PredictionService::build_record(&bad).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::UnknownCrop(_))
        ));
    }

    #[test]
    fn test_empty_area_rejected() {
        let mut bad = request();
        bad.area = String::new();
        let err = PredictionService::build_record(&bad).unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest { ref field, .. } if field == "area"));
    }

    #[test]
    fn test_first_invalid_field_is_stable() {
        let mut bad = request();
        bad.area = String::new();
        bad.year = 1800;
        for _ in 0..16 {
            let err = PredictionService::build_record(&bad).unwrap_err();
            assert!(matches!(err, AppError::InvalidRequest { ref field, .. } if field == "area"));
        }
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        let mut bad = request();
        bad.year = 2200;
        let err = PredictionService::build_record(&bad).unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest { .. }));
    }
}
