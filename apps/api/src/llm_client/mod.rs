/// LLM Client: the single point of entry for all generative model calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Analyzers and the image extractor depend on `CompletionService`, never on `LlmClient`.
///
/// Model: gemini-2.0-flash (hardcoded: do not make configurable to prevent drift)
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.0-flash";
const MAX_ATTEMPTS: u32 = 3;
/// Delay before the first retry; doubled for each further one.
const BASE_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion timed out after {0:?}")]
    Timeout(Duration),

    #[error("could not decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Rate limits, server errors and connection failures are worth another attempt.
    fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(_) => true,
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Image bytes sent alongside a prompt (document transcription).
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Opaque text completion: prompt (plus optional image) in, text out.
///
/// Carried in `AppState` as `Arc<dyn CompletionService>` so tests can script replies.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str, image: Option<&InlineImage>)
        -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineDataPart,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPart {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client used by all services.
/// Wraps the Gemini `generateContent` API with retry logic and a per-attempt timeout.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    timeout: Duration,
    base_url: String,
    backoff: Duration,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            timeout,
            base_url: GEMINI_API_BASE.to_string(),
            backoff: BASE_BACKOFF,
        })
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    /// A timed-out attempt is not retried. When every attempt was rate limited
    /// the error is `RateLimited`; otherwise the last failure is returned.
    pub async fn call(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<LlmResponse, LlmError> {
        let mut parts = vec![Part::Text { text: prompt }];
        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineDataPart {
                    mime_type: image.mime_type.clone(),
                    data: BASE64.encode(&image.data),
                },
            });
        }
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
        };
        let url = format!("{}/{MODEL}:generateContent", self.base_url);

        let mut attempt = 1;
        loop {
            let error = match self.send(&url, &request_body).await {
                Ok(response) => return Ok(response),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => e,
            };

            if attempt == MAX_ATTEMPTS {
                return Err(match error {
                    LlmError::Api { status: 429, .. } => LlmError::RateLimited {
                        retries: MAX_ATTEMPTS - 1,
                    },
                    other => other,
                });
            }

            // Exponential backoff: 1s, 2s
            let delay = self.backoff * (1 << (attempt - 1));
            warn!(
                "LLM call attempt {attempt} failed ({error}), retrying after {}ms...",
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// One request/response exchange, without retries.
    async fn send(
        &self,
        url: &str,
        request_body: &GenerateContentRequest<'_>,
    ) -> Result<LlmResponse, LlmError> {
        let as_llm_error = |e: reqwest::Error| {
            if e.is_timeout() {
                LlmError::Timeout(self.timeout)
            } else {
                LlmError::Http(e)
            }
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request_body)
            .send()
            .await
            .map_err(as_llm_error)?;

        let status = response.status();
        let body = response.text().await.map_err(as_llm_error)?;

        if !status.is_success() {
            warn!("LLM API returned {status}: {body}");
            // Try to parse error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &llm_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }
        Ok(llm_response)
    }

    #[cfg(test)]
    fn pointed_at(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self.backoff = Duration::from_millis(1);
        self
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, LlmError> {
        let response = self.call(prompt, image).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }
}

/// Scripted completion service for tests: replies are handed out in order.
#[cfg(test)]
pub mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct ScriptedCompletion {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
        images: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedCompletion {
        pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                ..Self::default()
            }
        }

        pub fn replying(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        /// MIME types of the images sent with each call (None for text-only calls).
        pub fn image_mime_types(&self) -> Vec<Option<String>> {
            self.images.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete(
            &self,
            prompt: &str,
            image: Option<&InlineImage>,
        ) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.images
                .lock()
                .unwrap()
                .push(image.map(|i| i.mime_type.clone()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }
}
