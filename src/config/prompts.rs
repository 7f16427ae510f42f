//! Prompt templates for Owl.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    pub chat: ChatPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for chunked summarization.
///
/// Both instructions are used as a preamble: the text being summarized is
/// appended directly after them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    /// Preamble for each chunk.
    pub chunk: String,
    /// Preamble for the final compression pass.
    pub final_pass: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            chunk: r#"Summarize this transcript with both an overview and detailed bullet points. Start with an overview in a couple of sentences. After that use bullet points to provide plenty of detail. Your response should be 1-2 pages long.
Example output:
## Overview
Short overview of the entire transcript. This is 2-3 sentences long.
## Details
- Detail of discussion 1
- Detail of discussion 2
- Detail of discussion 3
... and so on
"#
            .to_string(),

            final_pass: r#"Please provide a concise summary of the following text:
Example output:
## Overview
Short overview of the entire text. This is 2-3 sentences long.
## Details
- Detail of discussion 1
- Detail of discussion 2
- Detail of discussion 3
... and so on
"#
            .to_string(),
        }
    }
}

/// Prompts for the playground chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPrompts {
    /// Conversation template with `{{history}}` and `{{input}}` placeholders.
    pub template: String,
    /// First assistant message of every session.
    pub greeting: String,
}

impl Default for ChatPrompts {
    fn default() -> Self {
        Self {
            template: r#"The following is a friendly conversation between a human and an AI. The AI is talkative and provides lots of specific details from its context. If the AI does not know the answer to a question, it truthfully says it does not know. Use markdown code blocks whenever writing code back to the user. Use ` not '.

Current conversation:
{{history}}
Human: {{input}}
Assistant:"#
                .to_string(),
            greeting: "Hi! How may I help you?".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let chat_path = custom_path.join("chat.toml");
            if chat_path.exists() {
                let content = std::fs::read_to_string(&chat_path)?;
                prompts.chat = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
