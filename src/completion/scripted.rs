//! Scripted completion client for tests.

use super::{CompletionClient, CompletionRequest, CompletionResponse};
use crate::error::{OwlError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted reply.
pub enum Reply {
    Text(String),
    /// Response arrived without generated text.
    Empty,
    /// Transport failure.
    Fail(String),
}

/// Replays scripted replies in order and records every request.
///
/// When the script runs out, it echoes a short marker derived from the call
/// number.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(CompletionResponse::with_text(text)),
            Some(Reply::Empty) => Ok(CompletionResponse::default()),
            Some(Reply::Fail(msg)) => Err(OwlError::Completion(msg)),
            None => Ok(CompletionResponse::with_text(format!("reply {}", call))),
        }
    }
}
