// Analysis: model-backed job and CV evaluation.
// Every analyzer goes prompt → CompletionService → normalizer → typed decode.

pub mod cv;
pub mod handlers;
pub mod job_role;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::analysis::normalizer::{normalize, ParseError};
use crate::llm_client::LlmError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("model returned JSON that is not a valid {what}: {source}")]
    Shape {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode {what} for the prompt: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Normalizes raw model text and decodes it as `T`.
pub(crate) fn decode_model_json<T: DeserializeOwned>(
    raw_text: &str,
    what: &'static str,
) -> Result<T, AnalysisError> {
    let value: Value = normalize(raw_text)?;
    serde_json::from_value(value).map_err(|source| AnalysisError::Shape { what, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::AnalysisResult;

    #[test]
    fn test_decode_model_json_accepts_fenced_output() {
        let raw = "```json\n{\"resume_evaluation_matrix\": [{\"kriteria\": \"ATS\", \"skor\": 7, \"catatan\": \"ok\"}]}\n```";
        let result: AnalysisResult = decode_model_json(raw, "CV analysis").unwrap();
        assert_eq!(result.evaluation_matrix.unwrap()[0].score, 7);
    }

    #[test]
    fn test_decode_model_json_reports_parse_failure() {
        let err = decode_model_json::<AnalysisResult>("maaf, saya tidak bisa", "CV analysis")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));
    }

    #[test]
    fn test_decode_model_json_reports_wrong_shape() {
        let err = decode_model_json::<AnalysisResult>("[1, 2, 3]", "CV analysis").unwrap_err();
        match err {
            AnalysisError::Shape { what, .. } => assert_eq!(what, "CV analysis"),
            other => panic!("expected Shape, got {other:?}"),
        }
    }
}
