//! Playground chat sessions.
//!
//! A session owns its history and settings; nothing is shared between
//! sessions. Only the last `memory_window` exchanges are sent back to the
//! model with each new message.

use crate::completion::{CompletionClient, CompletionRequest, SamplingParams};
use crate::config::{ChatSettings, Prompts};
use crate::error::{OwlError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Who sent a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One user's conversation with a model.
pub struct ChatSession {
    id: Uuid,
    client: Arc<dyn CompletionClient>,
    model: String,
    params: SamplingParams,
    memory_window: usize,
    prompts: Prompts,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Start a session. History begins with the greeting.
    pub fn new(client: Arc<dyn CompletionClient>, settings: &ChatSettings, prompts: Prompts) -> Self {
        let greeting = ChatMessage::assistant(prompts.chat.greeting.clone());
        Self {
            id: Uuid::new_v4(),
            client,
            model: settings.model.clone(),
            params: settings.sampling,
            memory_window: settings.memory_window,
            prompts,
            messages: vec![greeting],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: &str) {
        self.model = model.to_string();
    }

    pub fn set_memory_window(&mut self, window: usize) {
        self.memory_window = window;
    }

    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SamplingParams) {
        self.params = params;
    }

    /// Full message history, including the greeting.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Drop the conversation and start over from the greeting.
    pub fn reset(&mut self) {
        self.messages.truncate(1);
        debug!("Chat session {} reset", self.id);
    }

    /// Send a message and return the model's reply.
    ///
    /// On failure the history is left unchanged.
    #[instrument(skip(self, input), fields(session = %self.id))]
    pub async fn send(&mut self, input: &str) -> Result<String> {
        let prompt = self.build_prompt(input);
        let request = CompletionRequest::new(&self.model, prompt, self.params);

        let reply = self
            .client
            .complete(&request)
            .await?
            .into_text()
            .map_err(|e| OwlError::Chat(e.to_string()))?;

        self.messages.push(ChatMessage::user(input));
        self.messages.push(ChatMessage::assistant(reply.clone()));
        Ok(reply)
    }

    /// Render the conversation template for `input`.
    pub fn build_prompt(&self, input: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("history".to_string(), self.history_window());
        vars.insert("input".to_string(), input.to_string());
        self.prompts.render_with_custom(&self.prompts.chat.template, &vars)
    }

    /// The last `memory_window` user/assistant exchanges, one line each.
    fn history_window(&self) -> String {
        let exchanges: Vec<&[ChatMessage]> = self.messages[1..].chunks(2).collect();
        let skip = exchanges.len().saturating_sub(self.memory_window);

        exchanges[skip..]
            .iter()
            .flat_map(|pair| pair.iter())
            .map(|message| match message.role {
                Role::User => format!("Human: {}", message.content),
                Role::Assistant => format!("Assistant: {}", message.content),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
