//! CV Analyzer: scores a CV against a structured job analysis.

use tracing::info;

use crate::analysis::models::{AnalysisResult, JobAnalysis};
use crate::analysis::prompts::CV_ANALYSIS_PROMPT_TEMPLATE;
use crate::analysis::{decode_model_json, AnalysisError};
use crate::llm_client::prompts::{render_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::CompletionService;

/// The job is sent to the model as pretty-printed JSON of `job`.
pub async fn analyze_cv_against_job(
    cv_text: &str,
    job: &JobAnalysis,
    llm: &dyn CompletionService,
) -> Result<AnalysisResult, AnalysisError> {
    let job_requirements = serde_json::to_string_pretty(job).map_err(|source| {
        AnalysisError::Encode {
            what: "job analysis",
            source,
        }
    })?;

    let prompt = render_template(
        CV_ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("cv_text", cv_text),
            ("job_requirements", &job_requirements),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );
    let raw = llm.complete(&prompt, None).await?;
    let result: AnalysisResult = decode_model_json(&raw, "CV analysis")?;

    info!(
        "CV analysis: {} criteria, {} skill gaps, {} readiness aspects",
        result.evaluation_matrix.as_ref().map_or(0, Vec::len),
        result.skill_gap_analysis.as_ref().map_or(0, Vec::len),
        result.job_readiness_index.as_ref().map_or(0, Vec::len)
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{FoundInResume, JobInfo};
    use crate::llm_client::testing::ScriptedCompletion;

    const CV_REPLY: &str = r#"Berikut hasil analisisnya:
{
    "resume_evaluation_matrix": [
        {"kriteria": "Clarity & Structure", "skor": 8, "catatan": "Rapi"},
        {"kriteria": "ATS Compatibility", "skor": "4", "catatan": "Pakai tabel"}
    ],
    "skill_gap_analysis": [
        {"skill_area": "Data", "required_skill": "SQL", "found_in_resume": "no", "skill_gap": 4, "catatan": "Ikut kursus"}
    ],
    "job_readiness_index": [
        {"aspect": "Kesesuaian Skill", "skor": 6.4, "catatan": "Cukup"}
    ]
}
Semoga membantu!"#;

    fn job() -> JobAnalysis {
        JobAnalysis {
            info: Some(JobInfo {
                title: "Data Analyst".to_string(),
                ..JobInfo::default()
            }),
            responsibilities: Some(vec!["Membuat dashboard".to_string()]),
            ..JobAnalysis::default()
        }
    }

    #[tokio::test]
    async fn test_analyze_cv_salvages_json_from_chatter() {
        let llm = ScriptedCompletion::replying(&[CV_REPLY]);
        let result = analyze_cv_against_job("Budi, SQL pemula", &job(), &llm)
            .await
            .unwrap();

        let matrix = result.evaluation_matrix.unwrap();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[1].score, 4);
        let gaps = result.skill_gap_analysis.unwrap();
        assert_eq!(gaps[0].found, FoundInResume::No);
        assert_eq!(result.job_readiness_index.unwrap()[0].score, 6);
    }

    #[tokio::test]
    async fn test_prompt_embeds_cv_and_job_json() {
        let llm = ScriptedCompletion::replying(&["{}"]);
        let result = analyze_cv_against_job("Budi, SQL pemula", &job(), &llm)
            .await
            .unwrap();
        assert!(result.is_empty());

        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Budi, SQL pemula"));
        assert!(prompt.contains("\"title\": \"Data Analyst\""));
        assert!(prompt.contains("Membuat dashboard"));
        assert!(!prompt.contains("{job_requirements}"));
    }

    #[tokio::test]
    async fn test_non_object_reply_is_a_shape_error() {
        let llm = ScriptedCompletion::replying(&["\"ok\""]);
        let err = analyze_cv_against_job("cv", &job(), &llm).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Shape { .. }));
    }
}
