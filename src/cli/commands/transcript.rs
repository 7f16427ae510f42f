//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::document::transcript_from_speech_json;
use crate::storage::{transcript_object_name, LocalObjectStore, ObjectStore};
use anyhow::Result;
use std::path::Path;

/// Run the transcript command.
pub async fn run_transcript(
    input: &str,
    model_type: &str,
    source: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Storage, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let json = std::fs::read_to_string(input)?;
    let transcript = transcript_from_speech_json(&json)?;

    if transcript.trim().is_empty() {
        Output::warning("The speech result contains no transcription tokens.");
    }

    let source = source.unwrap_or_else(|| {
        Path::new(input)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.to_string())
    });

    let store = LocalObjectStore::new(&settings.bucket_dir())?;
    let name = transcript_object_name(&settings.storage.transcript_prefix, &source, model_type);
    store.put(&name, transcript.as_bytes()).await?;

    Output::success(&format!("Stored transcript as {}", name));
    Output::info(&format!("Summarize it with: owl summarize --stored {}", name));

    Ok(())
}
