//! OpenAI-compatible chat completions backend.

use super::{CompletionClient, CompletionRequest, CompletionResponse};
use crate::config::CompletionSettings;
use crate::error::{OwlError, Result};
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Create an OpenAI client from the completion settings.
///
/// The timeout applies to each request; nothing is retried here.
pub fn create_client(settings: &CompletionSettings) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_seconds))
        .build()
        .map_err(|e| OwlError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let mut config = OpenAIConfig::new();
    if let Some(api_base) = &settings.api_base {
        config = config.with_api_base(api_base);
    }
    if let Ok(key) = std::env::var(&settings.api_key_env) {
        config = config.with_api_key(key);
    }

    Ok(Client::with_config(config).with_http_client(http_client))
}

/// Completion client that sends each prompt as a single user message.
pub struct OpenAICompletionClient {
    client: Client<OpenAIConfig>,
}

impl OpenAICompletionClient {
    pub fn new(settings: &CompletionSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAICompletionClient {
    #[instrument(skip(self, request), fields(model = %request.model, prompt_len = request.prompt.len()))]
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let params = &request.params;
        if params.top_k != 0 {
            // No top-k on the OpenAI wire format.
            debug!("top_k={} is not sent to OpenAI-compatible endpoints", params.top_k);
        }

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt.clone())
                .build()
                .map_err(|e| OwlError::Completion(e.to_string()))?
                .into(),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .temperature(params.temperature)
            .top_p(params.top_p)
            .frequency_penalty(params.frequency_penalty)
            .presence_penalty(params.presence_penalty)
            .max_completion_tokens(params.max_tokens)
            .build()
            .map_err(|e| OwlError::Completion(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e| match e {
                OpenAIError::JSONDeserialize(err) => OwlError::MalformedResponse(err.to_string()),
                other => OwlError::Completion(other.to_string()),
            })?;

        let choice = response.choices.into_iter().next();
        let finish_reason = choice
            .as_ref()
            .and_then(|c| c.finish_reason.as_ref())
            .map(|r| format!("{:?}", r).to_lowercase());
        let text = choice.and_then(|c| c.message.content);

        debug!(
            "Completion returned {} chars",
            text.as_ref().map(|t| t.len()).unwrap_or(0)
        );

        Ok(CompletionResponse { text, finish_reason })
    }
}
