//! Crop Yield Prediction - Backend Server

use std::{net::SocketAddr, path::Path};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crop_yield_backend::{
    create_app,
    external::{provision_artifact, ProvisionOutcome},
    services::{load_pipeline, JsonPipelineDecoder},
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cyp_server=debug,crop_yield_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Crop Yield Prediction Server");
    tracing::info!("Environment: {}", config.environment);

    // Fetch the pipeline on first start; failures leave the service running
    if let ProvisionOutcome::Failed { message } = provision_artifact(&config.artifact).await {
        tracing::warn!("Continuing without a fresh artifact: {}", message);
    }

    let predictor = load_pipeline(Path::new(&config.artifact.path), &JsonPipelineDecoder);
    if predictor.is_none() {
        tracing::warn!("Predictions are disabled until a valid pipeline is installed");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(config, predictor);

    // Build application
    let app = create_app(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
