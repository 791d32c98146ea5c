//! Document Text Extractor: PDF, Word and image bytes into plain text.
//!
//! Extraction never fails past this boundary: every failure becomes a
//! human-readable placeholder that flows on as if it were document text.

pub mod docx;
pub mod handlers;
pub mod prompts;

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::extraction::docx::extract_docx_text;
use crate::extraction::prompts::IMAGE_TRANSCRIPTION_PROMPT;
use crate::llm_client::{CompletionService, InlineImage};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC_MIME: &str = "application/msword";
const OCTET_STREAM: &str = "application/octet-stream";
/// Sent to the model when the upload's declared type is not an image type.
const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Word,
    Image,
}

impl DocumentKind {
    /// Anything that is not PDF or Word is treated as an image.
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            PDF_MIME => DocumentKind::Pdf,
            DOCX_MIME | DOC_MIME => DocumentKind::Word,
            _ => DocumentKind::Image,
        }
    }
}

/// The upload's declared MIME type, or one guessed from the file extension
/// when the client sent none or `application/octet-stream`.
pub fn resolve_mime(declared: Option<&str>, file_name: Option<&str>) -> String {
    match declared.map(str::trim) {
        Some(mime) if !mime.is_empty() && mime != OCTET_STREAM => mime.to_ascii_lowercase(),
        _ => file_name
            .and_then(mime_from_extension)
            .unwrap_or(OCTET_STREAM)
            .to_string(),
    }
}

fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "pdf" => PDF_MIME,
        "docx" => DOCX_MIME,
        "doc" => DOC_MIME,
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => return None,
    })
}

#[derive(Clone)]
pub struct TextExtractor {
    llm: Arc<dyn CompletionService>,
}

impl TextExtractor {
    pub fn new(llm: Arc<dyn CompletionService>) -> Self {
        Self { llm }
    }

    /// Text of the document, or a placeholder describing why there is none.
    pub async fn extract(&self, bytes: Vec<u8>, mime: &str) -> String {
        let kind = DocumentKind::from_mime(mime);
        debug!("Extracting {} bytes as {kind:?} ({mime})", bytes.len());
        match kind {
            DocumentKind::Pdf => extract_pdf(bytes).await,
            DocumentKind::Word => extract_word(&bytes),
            DocumentKind::Image => self.extract_image(bytes, mime).await,
        }
    }

    async fn extract_image(&self, bytes: Vec<u8>, mime: &str) -> String {
        let mime_type = if mime.starts_with("image/") {
            mime.to_string()
        } else {
            FALLBACK_IMAGE_MIME.to_string()
        };
        let image = InlineImage {
            mime_type,
            data: bytes,
        };
        match self.llm.complete(IMAGE_TRANSCRIPTION_PROMPT, Some(&image)).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Image transcription failed: {e}");
                format!("Error extracting text from image: {e}")
            }
        }
    }
}

/// pdf-extract is CPU-bound and may panic on malformed input, so it runs on
/// the blocking pool where a panic surfaces as a `JoinError`.
async fn extract_pdf(bytes: Vec<u8>) -> String {
    let outcome =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;
    let failure = match outcome {
        Ok(Ok(text)) if text.trim().is_empty() => {
            warn!("PDF contained no extractable text");
            return "Tidak ada teks terbaca dari PDF".to_string();
        }
        Ok(Ok(text)) => return text.trim().to_string(),
        Ok(Err(e)) => e.to_string(),
        Err(e) => e.to_string(),
    };
    warn!("PDF extraction failed: {failure}");
    format!("Gagal ekstrak teks dari PDF: {failure}")
}

fn extract_word(bytes: &[u8]) -> String {
    match extract_docx_text(bytes) {
        Ok(text) if text.is_empty() => {
            warn!("Word document contained no text");
            "Tidak ada teks terbaca dari Word".to_string()
        }
        Ok(text) => text,
        Err(e) => {
            warn!("Word extraction failed: {e}");
            format!("Gagal ekstrak teks dari Word: {e}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::docx::tests::docx_with_body;
    use crate::llm_client::testing::ScriptedCompletion;
    use crate::llm_client::LlmError;

    fn extractor(llm: Arc<ScriptedCompletion>) -> TextExtractor {
        TextExtractor::new(llm)
    }

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(DocumentKind::from_mime("application/pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_mime(DOCX_MIME), DocumentKind::Word);
        assert_eq!(DocumentKind::from_mime("application/msword"), DocumentKind::Word);
        assert_eq!(DocumentKind::from_mime("image/png"), DocumentKind::Image);
        assert_eq!(DocumentKind::from_mime("text/plain"), DocumentKind::Image);
    }

    #[test]
    fn test_resolve_mime_falls_back_to_extension() {
        assert_eq!(resolve_mime(Some("Application/PDF"), Some("cv.docx")), "application/pdf");
        assert_eq!(resolve_mime(Some(OCTET_STREAM), Some("CV.PDF")), PDF_MIME);
        assert_eq!(resolve_mime(None, Some("lowongan.docx")), DOCX_MIME);
        assert_eq!(resolve_mime(Some(""), Some("scan.JPG")), "image/jpeg");
        assert_eq!(resolve_mime(None, Some("notes")), OCTET_STREAM);
        assert_eq!(resolve_mime(None, None), OCTET_STREAM);
    }

    #[tokio::test]
    async fn test_word_document_text() {
        let llm = Arc::new(ScriptedCompletion::replying(&[]));
        let bytes = docx_with_body("<w:p><w:r><w:t>Budi Santoso</w:t></w:r></w:p>");
        let text = extractor(llm.clone()).extract(bytes, DOCX_MIME).await;
        assert_eq!(text, "Budi Santoso");
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_word_placeholders() {
        let llm = Arc::new(ScriptedCompletion::replying(&[]));
        let extractor = extractor(llm);

        let empty = docx_with_body("<w:p/>");
        assert_eq!(
            extractor.extract(empty, DOCX_MIME).await,
            "Tidak ada teks terbaca dari Word"
        );

        let legacy = extractor.extract(b"legacy doc".to_vec(), DOC_MIME).await;
        assert!(legacy.starts_with("Gagal ekstrak teks dari Word: "));
    }

    #[tokio::test]
    async fn test_broken_pdf_becomes_placeholder() {
        let llm = Arc::new(ScriptedCompletion::replying(&[]));
        let text = extractor(llm)
            .extract(b"%PDF-1.4 truncated".to_vec(), PDF_MIME)
            .await;
        assert!(text.starts_with("Gagal ekstrak teks dari PDF: "));
    }

    #[tokio::test]
    async fn test_image_is_transcribed_with_its_mime_type() {
        let llm = Arc::new(ScriptedCompletion::replying(&["  Budi Santoso\nJakarta \n"]));
        let text = extractor(llm.clone())
            .extract(vec![0x89, b'P', b'N', b'G'], "image/png")
            .await;
        assert_eq!(text, "Budi Santoso\nJakarta");
        assert_eq!(llm.prompts(), vec![IMAGE_TRANSCRIPTION_PROMPT]);
        assert_eq!(llm.image_mime_types(), vec![Some("image/png".to_string())]);
    }

    #[tokio::test]
    async fn test_unknown_type_is_sent_as_jpeg() {
        let llm = Arc::new(ScriptedCompletion::replying(&["teks"]));
        extractor(llm.clone())
            .extract(vec![1, 2, 3], OCTET_STREAM)
            .await;
        assert_eq!(llm.image_mime_types(), vec![Some("image/jpeg".to_string())]);
    }

    #[tokio::test]
    async fn test_image_failure_becomes_placeholder() {
        let llm = Arc::new(ScriptedCompletion::new(vec![Err(LlmError::Api {
            status: 400,
            message: "bad image".to_string(),
        })]));
        let text = extractor(llm).extract(vec![1, 2, 3], "image/jpeg").await;
        assert_eq!(
            text,
            "Error extracting text from image: API error (status 400): bad image"
        );
    }
}
