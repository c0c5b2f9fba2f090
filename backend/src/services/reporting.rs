//! Report rendering for predictions
//! Produces the summary table, comparison chart and downloadable PDF

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use shared::{format_measurement, format_yield, FeatureRecord, RecommendationTier, SummaryRow};

use crate::error::{AppError, AppResult};
use crate::services::chart::ComparisonChart;
use crate::services::pdf::{FontStyle, PdfDocument};
use crate::services::prediction::PredictionOutcome;

pub const REPORT_TITLE: &str = "Crop Yield Prediction Report";
pub const REPORT_FILENAME: &str = "crop_yield_report.pdf";
pub const REPORT_CONTENT_TYPE: &str = "application/pdf";

/// Height of one report line, in mm
const LINE_HEIGHT_MM: f64 = 10.0;

/// Everything produced for one prediction
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub summary: Vec<SummaryRow>,
    pub chart: ComparisonChart,
    pub recommendation: String,
    pub pdf: Vec<u8>,
}

/// PDF report encoded for direct download
#[derive(Debug, Clone, Serialize)]
pub struct ReportDownload {
    pub filename: String,
    pub content_type: String,
    pub base64: String,
    pub data_uri: String,
}

impl ReportDocument {
    pub fn download(&self) -> ReportDownload {
        let encoded = STANDARD.encode(&self.pdf);
        ReportDownload {
            filename: REPORT_FILENAME.to_string(),
            content_type: REPORT_CONTENT_TYPE.to_string(),
            data_uri: format!("data:{};base64,{}", REPORT_CONTENT_TYPE, encoded),
            base64: encoded,
        }
    }
}

/// Report renderer
#[derive(Clone, Copy, Default)]
pub struct ReportingService;

impl ReportingService {
    pub fn new() -> Self {
        Self
    }

    /// Render all report artifacts for one prediction
    pub fn render(
        &self,
        record: &FeatureRecord,
        predicted_yield: f64,
        tier: RecommendationTier,
        baseline_yield: f64,
    ) -> ReportDocument {
        let summary = Self::summary_rows(record, predicted_yield);
        let chart = ComparisonChart::new(record.item().name(), predicted_yield, baseline_yield);
        let pdf = Self::render_pdf(&summary, tier);

        ReportDocument {
            summary,
            chart,
            recommendation: tier.message().to_string(),
            pdf,
        }
    }

    pub fn render_outcome(&self, outcome: &PredictionOutcome) -> ReportDocument {
        self.render(
            &outcome.record,
            outcome.predicted_yield,
            outcome.tier,
            outcome.baseline_yield,
        )
    }

    /// Labeled inputs plus the predicted yield, in display order
    pub fn summary_rows(record: &FeatureRecord, predicted_yield: f64) -> Vec<SummaryRow> {
        vec![
            SummaryRow::new("Area", record.area()),
            SummaryRow::new("Crop", record.item().name()),
            SummaryRow::new("Year", record.year().to_string()),
            SummaryRow::new("Rainfall (mm)", format_measurement(record.rainfall_mm())),
            SummaryRow::new("Pesticide (kg/ha)", format_measurement(record.pesticide_usage())),
            SummaryRow::new("Avg Temp (°C)", format_measurement(record.avg_temp())),
            SummaryRow::new("Predicted Yield (hg/ha)", format_yield(predicted_yield)),
        ]
    }

    fn render_pdf(summary: &[SummaryRow], tier: RecommendationTier) -> Vec<u8> {
        let mut doc = PdfDocument::new(REPORT_TITLE);
        doc.add_page();
        doc.set_font(FontStyle::Regular, 12.0);
        for row in summary {
            doc.cell(LINE_HEIGHT_MM, &format!("{}: {}", row.feature, row.value));
        }
        doc.multi_cell(
            LINE_HEIGHT_MM,
            &format!("Recommendation: {}", tier.message()),
        );
        doc.finish()
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Report(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Report(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Report(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
