//! Chunked multi-pass summarization.
//!
//! A run moves through fixed stages and never revisits one:
//!
//! 1. split the document into token-bounded chunks,
//! 2. summarize each chunk with its own completion request, in order,
//! 3. join the partial summaries with a single space,
//! 4. collapse repeated `## Details` headings,
//! 5. compress the result with one final completion request.
//!
//! A chunk whose response carries no text contributes an inline
//! `Error: ...` string instead of aborting the run; the final pass degrades
//! the same way. Transport failures are not caught here and propagate to
//! the caller.

mod dedup;

pub use dedup::{dedupe_heading, DETAILS_HEADING};

use crate::chunking::TokenChunker;
use crate::completion::{
    CompletionClient, CompletionRequest, CompletionResponse, OpenAICompletionClient,
    SamplingParams,
};
use crate::config::{Prompts, Settings, SummarizationSettings};
use crate::error::{OwlError, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Stage of a summarization run, reported to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStage {
    Chunking,
    PerChunkSummarizing { chunk: usize, total: usize },
    Combining,
    Deduplicating,
    FinalSummarizing,
    Done,
}

impl fmt::Display for SummaryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryStage::Chunking => write!(f, "Chunking document"),
            SummaryStage::PerChunkSummarizing { chunk, total } => {
                write!(f, "Summarizing chunk {}/{}", chunk + 1, total)
            }
            SummaryStage::Combining => write!(f, "Combining summaries"),
            SummaryStage::Deduplicating => write!(f, "Removing duplicate headings"),
            SummaryStage::FinalSummarizing => write!(f, "Writing final summary"),
            SummaryStage::Done => write!(f, "Done"),
        }
    }
}

/// Knobs for one summarizer.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub model: String,
    pub tokenizer: String,
    pub chunk_size: usize,
    pub heading: String,
    pub params: SamplingParams,
}

impl From<&SummarizationSettings> for SummaryOptions {
    fn from(settings: &SummarizationSettings) -> Self {
        Self {
            model: settings.model.clone(),
            tokenizer: settings.tokenizer.clone(),
            chunk_size: settings.chunk_size,
            heading: settings.heading.clone(),
            params: settings.sampling,
        }
    }
}

/// Outcome of a summarization run.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Final summary, or an `Error: ...` string if the final pass failed.
    pub summary: String,
    /// Per-chunk summaries in chunk order, with inline error markers.
    pub partials: Vec<String>,
    /// Combined, de-duplicated text fed to the final pass.
    pub combined: String,
    pub chunk_count: usize,
    /// Completion requests issued, including the final pass.
    pub completion_calls: usize,
}

impl SummaryReport {
    /// Number of chunks whose summary is an error marker.
    pub fn failed_chunks(&self) -> usize {
        self.partials.iter().filter(|p| is_error_marker(p)).count()
    }

    /// Whether the final pass produced an error marker.
    pub fn final_failed(&self) -> bool {
        is_error_marker(&self.summary)
    }
}

fn is_error_marker(text: &str) -> bool {
    text.starts_with("Error: ")
}

/// Summarizes documents of any length through a completion backend.
pub struct Summarizer {
    client: Arc<dyn CompletionClient>,
    chunker: TokenChunker,
    options: SummaryOptions,
    chunk_instruction: String,
    final_instruction: String,
}

impl Summarizer {
    /// Create a summarizer with an explicit client, options and prompts.
    pub fn new(
        client: Arc<dyn CompletionClient>,
        options: SummaryOptions,
        prompts: &Prompts,
    ) -> Result<Self> {
        let chunker = TokenChunker::new(&options.tokenizer, options.chunk_size)?;

        let vars = HashMap::new();
        let chunk_instruction = prompts.render_with_custom(&prompts.summary.chunk, &vars);
        let final_instruction = prompts.render_with_custom(&prompts.summary.final_pass, &vars);

        Ok(Self {
            client,
            chunker,
            options,
            chunk_instruction,
            final_instruction,
        })
    }

    /// Create a summarizer backed by the configured OpenAI-compatible endpoint.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let client = Arc::new(OpenAICompletionClient::new(&settings.completion)?);
        Self::new(client, SummaryOptions::from(&settings.summarization), &prompts)
    }

    pub fn options(&self) -> &SummaryOptions {
        &self.options
    }

    /// Summarize `text`.
    pub async fn summarize(&self, text: &str) -> Result<SummaryReport> {
        self.summarize_with_progress(text, |_| {}).await
    }

    /// Summarize `text`, reporting each stage to `on_stage`.
    #[instrument(skip(self, text, on_stage), fields(model = %self.options.model, len = text.len()))]
    pub async fn summarize_with_progress<F>(&self, text: &str, mut on_stage: F) -> Result<SummaryReport>
    where
        F: FnMut(SummaryStage) + Send,
    {
        if text.trim().is_empty() {
            return Err(OwlError::InvalidInput("document is empty".to_string()));
        }

        on_stage(SummaryStage::Chunking);
        let chunks = self.chunker.chunk(text);
        info!(
            "Summarizing {} chunks with {} (tokenizer {})",
            chunks.len(),
            self.options.model,
            self.chunker.tokenizer().name()
        );

        let mut partials = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            on_stage(SummaryStage::PerChunkSummarizing {
                chunk: chunk.index,
                total: chunks.len(),
            });
            let prompt = format!("{}{}", self.chunk_instruction, chunk.text);
            let partial = self.complete_or_marker(prompt).await?;
            if is_error_marker(&partial) {
                warn!("Chunk {} failed: {}", chunk.index, partial);
            } else {
                debug!("Chunk {} summarized ({} chars)", chunk.index, partial.len());
            }
            partials.push(partial);
        }

        on_stage(SummaryStage::Combining);
        let combined = partials.join(" ");

        on_stage(SummaryStage::Deduplicating);
        let combined = dedupe_heading(&combined, &self.options.heading);

        on_stage(SummaryStage::FinalSummarizing);
        let prompt = format!("{}{}", self.final_instruction, combined);
        let summary = self.complete_or_marker(prompt).await?;
        if is_error_marker(&summary) {
            warn!("Final summary failed: {}", summary);
        }

        on_stage(SummaryStage::Done);
        let chunk_count = chunks.len();
        Ok(SummaryReport {
            summary,
            partials,
            combined,
            chunk_count,
            completion_calls: chunk_count + 1,
        })
    }

    /// Run one completion. A malformed response becomes `Error: ...` text;
    /// anything else is returned as an error.
    async fn complete_or_marker(&self, prompt: String) -> Result<String> {
        let request = CompletionRequest::new(&self.options.model, prompt, self.options.params);
        let outcome = self
            .client
            .complete(&request)
            .await
            .and_then(CompletionResponse::into_text);

        match outcome {
            Ok(text) => Ok(text),
            Err(e @ OwlError::MalformedResponse(_)) => Ok(format!("Error: {}", e)),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::DEFAULT_TOKENIZER;
    use crate::completion::scripted::{Reply, ScriptedClient};

    fn options(chunk_size: usize) -> SummaryOptions {
        SummaryOptions {
            model: "test-model".to_string(),
            tokenizer: DEFAULT_TOKENIZER.to_string(),
            chunk_size,
            heading: DETAILS_HEADING.to_string(),
            params: SamplingParams::deterministic(),
        }
    }

    fn summarizer(client: Arc<ScriptedClient>, chunk_size: usize) -> Summarizer {
        Summarizer::new(client, options(chunk_size), &Prompts::default()).unwrap()
    }

    fn chunk_reply(n: usize) -> Reply {
        Reply::Text(format!(
            "## Overview\nPart {n}.\n## Details\n- point {n}"
        ))
    }

    #[tokio::test]
    async fn test_seven_thousand_tokens_make_four_calls() {
        let client = Arc::new(ScriptedClient::new(vec![
            chunk_reply(1),
            chunk_reply(2),
            chunk_reply(3),
            Reply::Text("final".to_string()),
        ]));
        let summarizer = summarizer(client.clone(), 3000);

        let report = summarizer.summarize(&" apple".repeat(7000)).await.unwrap();

        assert_eq!(report.chunk_count, 3);
        assert_eq!(report.completion_calls, 4);
        assert_eq!(report.summary, "final");

        let requests = client.requests();
        assert_eq!(requests.len(), 4);
        for request in &requests {
            assert_eq!(request.model, "test-model");
            assert_eq!(request.params, SamplingParams::deterministic());
        }
        assert!(requests[0].prompt.starts_with("Summarize this transcript"));
        assert!(requests[3].prompt.starts_with("Please provide a concise summary"));
    }

    #[tokio::test]
    async fn test_partials_follow_chunk_order_and_dedupe() {
        let client = Arc::new(ScriptedClient::new(vec![
            chunk_reply(1),
            chunk_reply(2),
            chunk_reply(3),
        ]));
        let summarizer = summarizer(client.clone(), 10);

        let report = summarizer.summarize(&" apple".repeat(25)).await.unwrap();

        assert_eq!(report.partials.len(), 3);
        assert!(report.partials[0].contains("point 1"));
        assert!(report.partials[2].contains("point 3"));

        assert_eq!(report.combined.matches(DETAILS_HEADING).count(), 1);
        let p1 = report.combined.find("- point 1").unwrap();
        let p2 = report.combined.find("- point 2").unwrap();
        let p3 = report.combined.find("- point 3").unwrap();
        assert!(p1 < p2 && p2 < p3);

        let final_prompt = &client.requests()[3].prompt;
        assert!(final_prompt.ends_with(&report.combined));
    }

    #[tokio::test]
    async fn test_malformed_chunk_response_is_inlined() {
        let client = Arc::new(ScriptedClient::new(vec![
            Reply::Text("summary1".to_string()),
            Reply::Empty,
            Reply::Text("summary3".to_string()),
            Reply::Text("final".to_string()),
        ]));
        let summarizer = summarizer(client.clone(), 10);

        let report = summarizer.summarize(&" apple".repeat(30)).await.unwrap();

        assert_eq!(report.partials[0], "summary1");
        assert!(report.partials[1].starts_with("Error: "));
        assert_eq!(report.partials[2], "summary3");
        assert_eq!(report.failed_chunks(), 1);
        assert_eq!(report.summary, "final");
        assert_eq!(client.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_malformed_final_response_is_error_string() {
        let client = Arc::new(ScriptedClient::new(vec![
            Reply::Text("only chunk".to_string()),
            Reply::Empty,
        ]));
        let summarizer = summarizer(client, crate::chunking::DEFAULT_CHUNK_SIZE);

        let report = summarizer.summarize("A short memo.").await.unwrap();

        assert!(report.final_failed());
        assert!(report.summary.starts_with("Error: "));
        assert_eq!(report.partials, vec!["only chunk".to_string()]);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let client = Arc::new(ScriptedClient::new(vec![
            Reply::Text("summary1".to_string()),
            Reply::Fail("connection reset".to_string()),
        ]));
        let summarizer = summarizer(client.clone(), 10);

        let result = summarizer.summarize(&" apple".repeat(30)).await;

        assert!(matches!(result, Err(OwlError::Completion(_))));
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_document_rejected_without_calls() {
        let client = Arc::new(ScriptedClient::new(vec![]));
        let summarizer = summarizer(client.clone(), 10);

        assert!(matches!(
            summarizer.summarize("   \n").await,
            Err(OwlError::InvalidInput(_))
        ));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_stages_reported_in_order() {
        let client = Arc::new(ScriptedClient::new(vec![]));
        let summarizer = summarizer(client, 10);

        let mut stages = Vec::new();
        summarizer
            .summarize_with_progress(&" apple".repeat(15), |stage| stages.push(stage))
            .await
            .unwrap();

        assert_eq!(
            stages,
            vec![
                SummaryStage::Chunking,
                SummaryStage::PerChunkSummarizing { chunk: 0, total: 2 },
                SummaryStage::PerChunkSummarizing { chunk: 1, total: 2 },
                SummaryStage::Combining,
                SummaryStage::Deduplicating,
                SummaryStage::FinalSummarizing,
                SummaryStage::Done,
            ]
        );
    }
}
