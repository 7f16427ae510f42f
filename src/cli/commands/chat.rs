//! Interactive chat command.

use crate::chat::ChatSession;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::completion::{CompletionClient, OpenAICompletionClient, SamplingParams};
use crate::config::{Prompts, Settings};
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;

/// Arguments of the chat command.
#[derive(Debug, Clone, Default)]
pub struct ChatArgs {
    pub model: Option<String>,
    pub window: Option<usize>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub max_tokens: Option<u32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
}

impl ChatArgs {
    /// Apply command-line overrides on top of the configured sampling.
    fn params(&self, base: SamplingParams) -> SamplingParams {
        SamplingParams {
            temperature: self.temperature.unwrap_or(base.temperature),
            top_p: self.top_p.unwrap_or(base.top_p),
            top_k: self.top_k.unwrap_or(base.top_k),
            max_tokens: self.max_tokens.unwrap_or(base.max_tokens),
            frequency_penalty: self.frequency_penalty.unwrap_or(base.frequency_penalty),
            presence_penalty: self.presence_penalty.unwrap_or(base.presence_penalty),
        }
    }

    /// Start a session with the overrides applied.
    fn session(
        &self,
        client: Arc<dyn CompletionClient>,
        settings: &Settings,
        prompts: Prompts,
    ) -> ChatSession {
        let mut chat = ChatSession::new(client, &settings.chat, prompts);
        if let Some(model) = &self.model {
            chat.set_model(model);
        }
        if let Some(window) = self.window {
            chat.set_memory_window(window);
        }
        chat.set_params(self.params(settings.chat.sampling));
        chat
    }
}

/// Run the interactive chat command.
pub async fn run_chat(args: ChatArgs, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let client = Arc::new(OpenAICompletionClient::new(&settings.completion)?);

    let mut chat = args.session(client, &settings, prompts);
    info!(
        "Chat session {} using {} ({:?})",
        chat.id(),
        chat.model(),
        chat.params()
    );

    println!("\n{}", style("Owl Chat").bold().cyan());
    println!(
        "{}\n",
        style("Type your message, or 'exit' to quit. Use 'reset' to start over.").dim()
    );
    if let Some(greeting) = chat.messages().first() {
        println!("{} {}\n", style("Owl:").cyan().bold(), greeting.content);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("reset") || input.eq_ignore_ascii_case("clear") {
            chat.reset();
            Output::info("Chat reset!");
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        let result = chat.send(input).await;
        spinner.finish_and_clear();

        match result {
            Ok(response) => {
                println!("\n{} {}\n", style("Owl:").cyan().bold(), response);
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::scripted::ScriptedClient;

    #[tokio::test]
    async fn test_sampling_overrides_reach_requests() {
        let client = Arc::new(ScriptedClient::new(vec![]));
        let args = ChatArgs {
            model: Some("tuned-model".to_string()),
            window: Some(0),
            temperature: Some(0.9),
            top_k: Some(40),
            presence_penalty: Some(1.2),
            ..Default::default()
        };

        let mut chat = args.session(client.clone(), &Settings::default(), Prompts::default());
        chat.send("first").await.unwrap();
        chat.send("second").await.unwrap();

        let request = &client.requests()[1];
        assert_eq!(request.model, "tuned-model");
        assert_eq!(request.params.temperature, 0.9);
        assert_eq!(request.params.top_k, 40);
        assert_eq!(request.params.presence_penalty, 1.2);
        // Untouched knobs keep the configured chat values.
        assert_eq!(request.params.max_tokens, 500);
        assert_eq!(request.params.top_p, 0.75);
        assert!(!request.prompt.contains("Human: first"));
    }
}
