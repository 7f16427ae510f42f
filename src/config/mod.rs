//! Configuration module for Owl.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ChatPrompts, Prompts, SummaryPrompts};
pub use settings::{
    ChatSettings, CompletionSettings, GeneralSettings, PromptSettings, Settings,
    StorageSettings, SummarizationSettings,
};
