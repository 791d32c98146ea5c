//! Job Role Analyzer: turns a job posting (or just a title) into a `JobAnalysis`.

use tracing::{debug, info};

use crate::analysis::models::{JobAnalysis, JobLevel};
use crate::analysis::prompts::{JOB_ANALYSIS_PROMPT_TEMPLATE, JOB_REQUIREMENTS_PROMPT_TEMPLATE};
use crate::analysis::{decode_model_json, AnalysisError};
use crate::llm_client::prompts::{render_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::CompletionService;

/// Asks the model for a typical job description for `title` at `level`.
/// The reply is free text and is returned trimmed.
pub async fn generate_job_requirements(
    title: &str,
    level: JobLevel,
    llm: &dyn CompletionService,
) -> Result<String, AnalysisError> {
    let prompt = render_template(
        JOB_REQUIREMENTS_PROMPT_TEMPLATE,
        &[("job_title", title.trim()), ("level", level.as_str())],
    );
    let text = llm.complete(&prompt, None).await?;
    info!("Generated job requirements for '{}' ({level})", title.trim());
    Ok(text.trim().to_string())
}

/// Structured analysis of a job posting.
pub async fn analyze_job_role(
    job_text: &str,
    level: JobLevel,
    llm: &dyn CompletionService,
) -> Result<JobAnalysis, AnalysisError> {
    let prompt = render_template(
        JOB_ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("level", level.as_str()),
            ("job_text", job_text),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );
    let raw = llm.complete(&prompt, None).await?;
    let analysis: JobAnalysis = decode_model_json(&raw, "job analysis")?;
    debug!(
        "Job analysis: {} skill groups, {} responsibilities",
        analysis.required_skills.as_ref().map_or(0, Vec::len),
        analysis.responsibilities.as_ref().map_or(0, Vec::len)
    );
    Ok(analysis)
}
