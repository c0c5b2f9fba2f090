//! Prediction handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{RecommendationTier, SummaryRow};

use crate::error::AppResult;
use crate::services::prediction::PredictionRequest;
use crate::services::reporting::{
    ReportDownload, ReportingService, REPORT_CONTENT_TYPE, REPORT_FILENAME,
};
use crate::services::ComparisonChart;
use crate::AppState;

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Full prediction response
#[derive(Serialize)]
pub struct PredictionResponse {
    pub summary: Vec<SummaryRow>,
    pub predicted_yield: f64,
    pub tier: RecommendationTier,
    /// Display name of the tier, as shown in the browser form
    pub tier_label: String,
    pub recommendation: String,
    pub baseline_yield: f64,
    pub chart: ComparisonChart,
    pub chart_svg: String,
    pub report: ReportDownload,
}

/// Predict yield and return every rendered artifact
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> AppResult<Json<PredictionResponse>> {
    let outcome = state.prediction_service().run(&request)?;
    let report = ReportingService::new().render_outcome(&outcome);

    Ok(Json(PredictionResponse {
        predicted_yield: outcome.predicted_yield,
        tier: outcome.tier,
        tier_label: outcome.tier.to_string(),
        baseline_yield: outcome.baseline_yield,
        chart_svg: report.chart.to_svg(),
        report: report.download(),
        summary: report.summary,
        recommendation: report.recommendation,
        chart: report.chart,
    }))
}

/// Predict yield and answer with the PDF report as an attachment
pub async fn download_report(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = state.prediction_service().run(&request)?;
    let report = ReportingService::new().render_outcome(&outcome);

    Ok((
        [
            (header::CONTENT_TYPE, REPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILENAME),
            ),
        ],
        report.pdf,
    ))
}

/// Predict yield and return only the summary table
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
    Json(request): Json<PredictionRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = state.prediction_service().run(&request)?;
    let rows = ReportingService::summary_rows(&outcome.record, outcome.predicted_yield);

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&rows)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"crop_yield_summary.csv\""),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(rows).into_response())
    }
}
