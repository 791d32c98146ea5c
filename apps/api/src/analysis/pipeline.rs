//! Orchestration: one CV/job pair through requirement generation, job analysis
//! and CV analysis.
//!
//! All per-request data lives in an `AnalysisSession` that each stage fills in
//! and hands to the next. Nothing survives the request.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::cv::analyze_cv_against_job;
use crate::analysis::job_role::{analyze_job_role, generate_job_requirements};
use crate::analysis::models::{AnalysisResult, JobAnalysis, JobLevel};
use crate::errors::AppError;
use crate::llm_client::CompletionService;

/// Where the job description comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSource {
    /// Pasted or previously extracted posting text.
    Text(String),
    /// Only a title; requirements are generated first.
    Title(String),
}

impl JobSource {
    fn is_blank(&self) -> bool {
        match self {
            JobSource::Text(s) | JobSource::Title(s) => s.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub id: Uuid,
    pub cv_text: String,
    pub job_source: JobSource,
    pub level: JobLevel,
    pub job_text: Option<String>,
    pub job_analysis: Option<JobAnalysis>,
    pub analysis_result: Option<AnalysisResult>,
}

impl AnalysisSession {
    pub fn new(cv_text: String, job_source: JobSource, level: JobLevel) -> Self {
        Self {
            id: Uuid::new_v4(),
            cv_text,
            job_source,
            level,
            job_text: None,
            job_analysis: None,
            analysis_result: None,
        }
    }
}

/// Runs every stage in order. A failing stage stops the pipeline and the
/// stages after it never run.
pub async fn run_analysis(
    mut session: AnalysisSession,
    llm: &dyn CompletionService,
) -> Result<AnalysisSession, AppError> {
    if session.cv_text.trim().is_empty() {
        return Err(AppError::Validation("cv_text cannot be empty".to_string()));
    }
    if session.job_source.is_blank() {
        return Err(AppError::Validation(
            "job text or job title is required".to_string(),
        ));
    }

    info!(session = %session.id, level = %session.level, "Starting CV analysis");

    let job_text = match &session.job_source {
        JobSource::Text(text) => text.clone(),
        JobSource::Title(title) => generate_job_requirements(title, session.level, llm).await?,
    };
    let job_text = session.job_text.insert(job_text);

    let job_analysis = analyze_job_role(job_text, session.level, llm).await?;
    let job_analysis = session.job_analysis.insert(job_analysis);

    let result = analyze_cv_against_job(&session.cv_text, job_analysis, llm).await?;
    session.analysis_result = Some(result);

    info!(session = %session.id, "CV analysis complete");
    Ok(session)
}
