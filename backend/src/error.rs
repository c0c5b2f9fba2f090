//! Error handling for the Crop Yield Prediction service
//!
//! Every failure ends the current request only; the response carries a
//! human-readable message and a stable error code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ValidationError;
use thiserror::Error;

use crate::services::predictor::PredictorError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Artifact errors
    #[error("Could not download pipeline artifact: {0}")]
    ArtifactFetch(String),

    #[error("Failed to load pipeline artifact: {0}")]
    Deserialization(String),

    // Request errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {message}")]
    InvalidRequest { field: String, message: String },

    // Prediction errors
    #[error("Prediction model is not available")]
    PredictorUnavailable,

    #[error("Prediction failed: {0}")]
    PredictionFailure(#[from] PredictorError),

    // Rendering errors
    #[error("Report rendering failed: {0}")]
    Report(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (field, message) = errors
            .field_errors()
            .into_iter()
            .min_by_key(|(field, _)| *field)
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("request".to_string(), errors.to_string()));

        AppError::InvalidRequest { field, message }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Stable machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ArtifactFetch(_) => "ARTIFACT_FETCH_ERROR",
            AppError::Deserialization(_) => "DESERIALIZATION_ERROR",
            AppError::Validation(_) | AppError::InvalidRequest { .. } => "VALIDATION_ERROR",
            AppError::PredictorUnavailable => "PREDICTOR_UNAVAILABLE",
            AppError::PredictionFailure(_) => "PREDICTION_FAILURE",
            AppError::Report(_) => "REPORT_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::PredictorUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ArtifactFetch(_) => StatusCode::BAD_GATEWAY,
            AppError::Deserialization(_)
            | AppError::PredictionFailure(_)
            | AppError::Report(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let field = match &self {
            AppError::Validation(err) => Some(err.field().to_string()),
            AppError::InvalidRequest { field, .. } => Some(field.clone()),
            _ => None,
        };
        let message = match &self {
            AppError::InvalidRequest { message, .. } => message.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };
        let error_detail = ErrorDetail {
            code: self.code().to_string(),
            message,
            field,
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (self.status(), Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err: AppError = ValidationError::NonNumeric { field: "rainfall" }.into();
        assert_eq!(
            err.to_string(),
            "Please enter valid numeric values for rainfall, pesticide usage, and temperature."
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::PredictorUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::PredictionFailure(PredictorError::Model("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::ArtifactFetch("404".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
