//! Yield predictor interface
//!
//! The trained pipeline is opaque to the rest of the service: anything that
//! maps a [`FeatureRecord`] to a yield estimate can stand in for it.

use shared::FeatureRecord;
use thiserror::Error;

/// Failure raised by a predictor while scoring one record
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("feature length mismatch: got {got}, expected {expected}")]
    FeatureMismatch { expected: usize, got: usize },

    #[error("model produced a non-finite yield ({0})")]
    NonFinite(f64),

    #[error("{0}")]
    Model(String),
}

/// A loaded yield model.
///
/// Implementations are read-only after construction and may be shared
/// between request handlers.
pub trait YieldPredictor: Send + Sync {
    /// Estimated yield in hg/ha for one record
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictorError>;

    /// Short human-readable description used in logs and health output
    fn describe(&self) -> String {
        "opaque predictor".to_string()
    }
}
