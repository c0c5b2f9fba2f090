//! Business logic services for the Crop Yield Prediction service

pub mod chart;
pub mod pdf;
pub mod pipeline;
pub mod prediction;
pub mod predictor;
pub mod reporting;

pub use chart::ComparisonChart;
pub use pipeline::{load_pipeline, JsonPipelineDecoder, PipelineDecoder};
pub use prediction::{PredictionOutcome, PredictionRequest, PredictionService};
pub use predictor::{PredictorError, YieldPredictor};
pub use reporting::{ReportDocument, ReportDownload, ReportingService};
