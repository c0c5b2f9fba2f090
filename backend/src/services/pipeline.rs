//! Pipeline loading
//!
//! The artifact on disk is an opaque blob; turning it into a predictor is the
//! job of a [`PipelineDecoder`] supplied by the caller.

use std::{path::Path, sync::Arc};

use crate::error::{AppError, AppResult};
use crate::models::RegressionPipeline;
use crate::services::predictor::YieldPredictor;

/// Turns artifact bytes into a ready predictor
pub trait PipelineDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> AppResult<Box<dyn YieldPredictor>>;
}

/// Decoder for JSON-serialized [`RegressionPipeline`] documents
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPipelineDecoder;

impl PipelineDecoder for JsonPipelineDecoder {
    fn decode(&self, bytes: &[u8]) -> AppResult<Box<dyn YieldPredictor>> {
        let pipeline: RegressionPipeline = serde_json::from_slice(bytes)
            .map_err(|e| AppError::Deserialization(format!("invalid pipeline document: {}", e)))?;
        pipeline.check().map_err(AppError::Deserialization)?;
        Ok(Box::new(pipeline))
    }
}

/// Read and decode the artifact at `path`
pub fn try_load_pipeline(
    path: &Path,
    decoder: &dyn PipelineDecoder,
) -> AppResult<Arc<dyn YieldPredictor>> {
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::Deserialization(format!("cannot read {}: {}", path.display(), e))
    })?;
    let predictor = decoder.decode(&bytes)?;
    Ok(Arc::from(predictor))
}

/// Load the pipeline once at start-up.
///
/// Failures are logged and reported as `None`; the service keeps running
/// without a predictor.
pub fn load_pipeline(path: &Path, decoder: &dyn PipelineDecoder) -> Option<Arc<dyn YieldPredictor>> {
    match try_load_pipeline(path, decoder) {
        Ok(predictor) => {
            tracing::info!(
                "Loaded pipeline from {}: {}",
                path.display(),
                predictor.describe()
            );
            Some(predictor)
        }
        Err(e) => {
            tracing::error!("{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LINEAR_PIPELINE: &str = r#"{
        "preprocessor": {
            "area_categories": ["Albania"],
            "item_categories": ["Maize"],
            "numeric_mean": [0.0, 0.0, 0.0, 0.0],
            "numeric_scale": [1.0, 1.0, 1.0, 1.0]
        },
        "model": {
            "kind": "linear",
            "coefficients": [0.0, 10.0, 0.0, 0.0, 1000.0, 2000.0],
            "intercept": 100.0
        }
    }"#;

    #[test]
    fn test_json_decoder_accepts_linear_pipeline() {
        let predictor = JsonPipelineDecoder.decode(LINEAR_PIPELINE.as_bytes()).unwrap();
        assert_eq!(predictor.describe(), "linear regression (6 features)");
    }

    #[test]
    fn test_json_decoder_rejects_garbage() {
        let err = JsonPipelineDecoder
            .decode(b"\x80\x04\x95pickle")
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Deserialization(_)));
    }

    #[test]
    fn test_missing_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load_pipeline(&path, &JsonPipelineDecoder).is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LINEAR_PIPELINE.as_bytes()).unwrap();
        assert!(load_pipeline(file.path(), &JsonPipelineDecoder).is_some());
    }
}
