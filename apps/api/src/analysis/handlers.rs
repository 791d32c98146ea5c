//! Axum route handlers for the job and CV analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::job_role::{analyze_job_role, generate_job_requirements};
use crate::analysis::models::{AnalysisResult, JobAnalysis, JobLevel};
use crate::analysis::pipeline::{run_analysis, AnalysisSession, JobSource};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobRequirementsRequest {
    pub title: String,
    #[serde(default)]
    pub level: JobLevel,
}

#[derive(Debug, Serialize)]
pub struct JobRequirementsResponse {
    pub job_text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_text: String,
    #[serde(default)]
    pub level: JobLevel,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub cv_text: String,
    pub job: JobSource,
    #[serde(default)]
    pub level: JobLevel,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub job_text: String,
    pub job_analysis: JobAnalysis,
    pub analysis_result: AnalysisResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/requirements
///
/// Generates a typical job description from a bare title.
pub async fn handle_job_requirements(
    State(state): State<AppState>,
    Json(request): Json<JobRequirementsRequest>,
) -> Result<Json<JobRequirementsResponse>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let job_text =
        generate_job_requirements(&request.title, request.level, state.llm.as_ref()).await?;

    Ok(Json(JobRequirementsResponse { job_text }))
}

/// POST /api/v1/jobs/analyze
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<JobAnalysis>, AppError> {
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }

    let analysis =
        analyze_job_role(&request.job_text, request.level, state.llm.as_ref()).await?;

    Ok(Json(analysis))
}

/// POST /api/v1/analyses
///
/// Full pipeline for one CV/job pair. Returns everything the report endpoint needs.
pub async fn handle_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let session = AnalysisSession::new(request.cv_text, request.job, request.level);
    let session = run_analysis(session, state.llm.as_ref()).await?;

    Ok(Json(AnalysisResponse {
        job_text: session.job_text.unwrap_or_default(),
        job_analysis: session.job_analysis.unwrap_or_default(),
        analysis_result: session.analysis_result.unwrap_or_default(),
    }))
}
