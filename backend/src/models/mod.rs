//! Models for the Crop Yield Prediction service
//!
//! Re-exports models from the shared crate and adds backend-specific models

pub mod pipeline;

pub use pipeline::{Preprocessor, Regressor, RegressionPipeline, RegressionTree};
pub use shared::models::*;
