//! JSON Response Normalizer: turns raw model text into a JSON value or a typed failure.
//!
//! Two stages: direct parse of the fence-stripped text, then a salvage parse of the
//! span between the first `{` and the last `}`. Anything else is a `ParseError`.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// How much of the raw response a `ParseError` keeps for diagnostics.
const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("model response is not valid JSON ({reason}); response began: {excerpt}")]
pub struct ParseError {
    /// Message of the direct parse failure.
    pub reason: String,
    pub excerpt: String,
}

/// Parses model output as JSON, tolerating code fences and surrounding chatter.
pub fn normalize(raw_text: &str) -> Result<Value, ParseError> {
    let text = strip_json_fences(raw_text);

    let direct_error = match serde_json::from_str::<Value>(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if let Some(span) = outermost_brace_span(text) {
        if let Ok(value) = serde_json::from_str::<Value>(span) {
            debug!(
                "Recovered JSON object from a {}-byte span of a {}-byte response",
                span.len(),
                text.len()
            );
            return Ok(value);
        }
    }

    Err(ParseError {
        reason: direct_error.to_string(),
        excerpt: excerpt(raw_text),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Either side may be missing.
fn strip_json_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(stripped) = text.strip_prefix("```") {
        text = stripped
            .strip_prefix("json")
            .or_else(|| stripped.strip_prefix("JSON"))
            .unwrap_or(stripped)
            .trim_start();
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped.trim_end();
    }
    text
}

/// First `{` through last `}`, inclusive. Not a balanced-brace match.
fn outermost_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(&text[start..=end])
}

fn excerpt(raw_text: &str) -> String {
    let trimmed = raw_text.trim();
    if trimmed.chars().count() <= EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(EXCERPT_CHARS).collect();
    out.push('…');
    out
}
