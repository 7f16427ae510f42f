//! Document loading and speech transcript formatting.

use crate::error::{OwlError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Extensions read as plain text.
const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown"];

/// Read a document from disk.
///
/// Text files (and files without an extension) are read with invalid UTF-8
/// replaced rather than rejected. PDF files have the text of every page
/// extracted. Other types are refused.
pub fn load_document(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        None => load_text(path),
        Some(ext) if TEXT_EXTENSIONS.contains(&ext) => load_text(path),
        Some("pdf") => load_pdf(path),
        Some(ext) => Err(OwlError::InvalidInput(format!(
            "unsupported file type '.{}': only text and PDF files can be summarized",
            ext
        ))),
    }
}

fn load_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
    Ok(text)
}

fn load_pdf(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        OwlError::InvalidInput(format!("could not read PDF {}: {}", path.display(), e))
    })?;
    debug!(
        "Extracted {} chars from PDF {} ({} bytes)",
        text.len(),
        path.display(),
        bytes.len()
    );
    Ok(text)
}

/// Output document of a speech-to-text job.
#[derive(Debug, Deserialize)]
pub struct SpeechResult {
    #[serde(default)]
    pub transcriptions: Vec<SpeechTranscription>,
}

#[derive(Debug, Deserialize)]
pub struct SpeechTranscription {
    #[serde(default)]
    pub transcription: Option<String>,
    #[serde(default)]
    pub tokens: Vec<SpeechToken>,
}

#[derive(Debug, Deserialize)]
pub struct SpeechToken {
    pub token: String,
    #[serde(default, rename = "speakerIndex")]
    pub speaker_index: Option<u32>,
}

/// Build a plain transcript from a speech job's JSON output.
///
/// Uses the tokens of the first transcription, each followed by a single
/// space. No transcriptions yields an empty string.
pub fn transcript_from_speech_json(json: &str) -> Result<String> {
    let result: SpeechResult = serde_json::from_str(json)?;
    Ok(transcript_from_speech(&result))
}

pub fn transcript_from_speech(result: &SpeechResult) -> String {
    let Some(first) = result.transcriptions.first() else {
        return String::new();
    };

    let mut transcript = String::new();
    for token in &first.tokens {
        transcript.push_str(&token.token);
        transcript.push(' ');
    }
    transcript
}
