//! Crop Yield Prediction service
//!
//! Predicts crop yield (hg/ha) from area, crop, year, rainfall, pesticide
//! usage and average temperature using a pre-trained regression pipeline,
//! then renders a recommendation, a comparison chart and a PDF report.

use axum::{routing::get, Router};
use shared::BaselineYieldTable;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::{PredictionService, YieldPredictor};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub predictor: Option<Arc<dyn YieldPredictor>>,
    pub baselines: Arc<BaselineYieldTable>,
}

impl AppState {
    pub fn new(config: Config, predictor: Option<Arc<dyn YieldPredictor>>) -> Self {
        Self {
            config: Arc::new(config),
            predictor,
            baselines: Arc::new(BaselineYieldTable::default()),
        }
    }

    pub fn prediction_service(&self) -> PredictionService {
        PredictionService::new(
            self.predictor.clone(),
            self.baselines.clone(),
            self.config.recommendation.thresholds(),
        )
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Yield Prediction API v1.0"
}
