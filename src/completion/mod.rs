//! Text-completion abstraction.
//!
//! The summarizer and the chat session only see the [`CompletionClient`]
//! trait; the OpenAI-compatible implementation lives in [`openai`].

mod openai;
#[cfg(test)]
pub(crate) mod scripted;

pub use openai::{create_client, OpenAICompletionClient};

use crate::error::{OwlError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    /// Zero disables top-k sampling.
    pub top_k: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    /// Maximum number of output tokens.
    pub max_tokens: u32,
}

impl SamplingParams {
    /// Parameters used by both summarization passes.
    pub fn deterministic() -> Self {
        Self {
            temperature: 0.0,
            top_p: 0.75,
            top_k: 0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            max_tokens: 2000,
        }
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::deterministic()
    }
}

/// A single prompt-in, text-out request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub params: SamplingParams,
}

impl CompletionRequest {
    pub fn new(model: &str, prompt: String, params: SamplingParams) -> Self {
        Self {
            model: model.to_string(),
            prompt,
            params,
        }
    }
}

/// What the endpoint answered. `text` is absent when the response did not
/// carry generated content.
#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    pub text: Option<String>,
    pub finish_reason: Option<String>,
}

impl CompletionResponse {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: None,
        }
    }

    /// Extract the generated text, or fail with [`OwlError::MalformedResponse`].
    pub fn into_text(self) -> Result<String> {
        self.text.ok_or_else(|| {
            OwlError::MalformedResponse(format!(
                "response has no text (finish_reason: {})",
                self.finish_reason.as_deref().unwrap_or("none")
            ))
        })
    }
}

/// Trait for text-completion backends.
///
/// Implementations return `Err` for transport failures. A response that
/// arrived but is missing fields is either `Ok` with `text: None` or
/// [`OwlError::MalformedResponse`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;
}
