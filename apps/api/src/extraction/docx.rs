//! `.docx` text: the runs of `word/document.xml`, one line per paragraph.

use std::io::{Cursor, Read};

use quick_xml::{events::Event, Reader as XmlReader};
use thiserror::Error;
use zip::ZipArchive;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a Word document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("could not read document body: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Paragraph texts joined with `\n` and trimmed. May be empty.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut document = archive.by_name("word/document.xml")?;
    let mut xml = String::new();
    document.read_to_string(&mut xml)?;

    let mut reader = XmlReader::from_str(&xml);
    let mut buf = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_node = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"w:t" => in_text_node = true,
                b"w:tab" => current.push('\t'),
                b"w:br" => current.push('\n'),
                _ => {}
            },
            Event::Empty(ref e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(e) => {
                if in_text_node {
                    current.push_str(&e.unescape()?);
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"w:t" => in_text_node = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n").trim().to_string())
}
