//! Route definitions for the Crop Yield Prediction service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/form", get(handlers::get_form))
        .nest("/predictions", prediction_routes())
}

/// Prediction routes
fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::predict))
        .route("/report", post(handlers::download_report))
        .route("/summary", post(handlers::get_summary))
}
