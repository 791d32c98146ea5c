//! Axum route handler for the spreadsheet download.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::analysis::models::{AnalysisResult, JobAnalysis};
use crate::errors::AppError;
use crate::report::{build_and_style_report, content_disposition, report_file_name, XLSX_MIME};

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub analysis_result: AnalysisResult,
    #[serde(default)]
    pub job_analysis: JobAnalysis,
    #[serde(default)]
    pub candidate_name: String,
}

/// POST /api/v1/reports
///
/// Builds the workbook from a previous analysis and returns it as an attachment.
pub async fn handle_report(Json(request): Json<ReportRequest>) -> Result<Response, AppError> {
    if request.analysis_result.is_empty() && request.job_analysis.is_empty() {
        return Err(AppError::Validation(
            "analysis_result or job_analysis is required".to_string(),
        ));
    }

    let bytes = build_and_style_report(
        &request.analysis_result,
        &request.job_analysis,
        &request.candidate_name,
    )?;
    let file_name = report_file_name(&request.candidate_name, chrono::Local::now().date_naive());
    info!("Built report {file_name} ({} bytes)", bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
        ],
        bytes,
    )
        .into_response())
}
