//! Summarize command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::document::load_document;
use crate::storage::{base_name, summary_object_name, LocalObjectStore, ObjectStore};
use crate::summarizer::Summarizer;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Arguments of the summarize command.
#[derive(Debug, Clone, Default)]
pub struct SummarizeArgs {
    pub input: String,
    pub stored: bool,
    pub model: Option<String>,
    pub chunk_size: Option<usize>,
    pub tokenizer: Option<String>,
    pub output: Option<String>,
    pub save: bool,
}

impl SummarizeArgs {
    /// Apply command-line overrides to the summarization settings.
    fn apply(&self, settings: &mut Settings) {
        let summarization = &mut settings.summarization;
        if let Some(model) = &self.model {
            summarization.model = model.clone();
        }
        if let Some(chunk_size) = self.chunk_size {
            summarization.chunk_size = chunk_size;
        }
        if let Some(tokenizer) = &self.tokenizer {
            summarization.tokenizer = tokenizer.clone();
        }
    }
}

/// Run the summarize command.
pub async fn run_summarize(args: SummarizeArgs, mut settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Summarize, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let store = LocalObjectStore::new(&settings.bucket_dir())?;

    let text = if args.stored {
        store.get_text(&args.input).await?
    } else {
        load_document(Path::new(&args.input))?
    };

    args.apply(&mut settings);
    let summarizer = Summarizer::from_settings(&settings)?;

    info!(
        "Summarizing {} with {} ({} tokens per chunk)",
        args.input,
        summarizer.options().model,
        summarizer.options().chunk_size
    );

    let spinner = Output::spinner("Generating summary...");
    let result = summarizer
        .summarize_with_progress(&text, |stage| spinner.set_message(stage.to_string()))
        .await;
    spinner.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            Output::error(&format!("Failed to generate summary: {}", e));
            return Err(e.into());
        }
    };

    if report.failed_chunks() > 0 {
        Output::warning(&format!(
            "{} of {} chunks could not be summarized; see the Error lines in the output.",
            report.failed_chunks(),
            report.chunk_count
        ));
    }
    if report.final_failed() {
        Output::warning("The final summary pass failed.");
    }

    match args.output.as_deref() {
        Some(path) if path != "-" => {
            std::fs::write(path, &report.summary)?;
            Output::success(&format!("Summary written to {}", path));
        }
        _ => println!("\n{}\n", report.summary),
    }

    if args.save {
        let name = summary_object_name(&settings.storage.transcript_prefix, base_name(&args.input));
        store.put(&name, report.summary.as_bytes()).await?;
        Output::success(&format!("Stored summary as {}", name));
    }

    Output::kv("Chunks", &report.chunk_count.to_string());
    Output::kv("Completion calls", &report.completion_calls.to_string());

    Ok(())
}
