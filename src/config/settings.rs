//! Configuration settings for Owl.

use crate::completion::SamplingParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub completion: CompletionSettings,
    pub summarization: SummarizationSettings,
    pub chat: ChatSettings,
    pub storage: StorageSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.owl".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Base URL of an OpenAI-compatible API. None uses the OpenAI default.
    pub api_base: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            api_base: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_seconds: 240,
        }
    }
}

/// Chunked summarization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizationSettings {
    /// Model used for both the per-chunk and the final pass.
    pub model: String,
    /// Maximum tokens per chunk.
    pub chunk_size: usize,
    /// Tokenizer identifier (encoding or model name).
    pub tokenizer: String,
    /// Section heading that is collapsed to a single occurrence.
    pub heading: String,
    pub sampling: SamplingParams,
}

impl Default for SummarizationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            chunk_size: 3000,
            tokenizer: "cl100k_base".to_string(),
            heading: "## Details".to_string(),
            sampling: SamplingParams::deterministic(),
        }
    }
}

/// Playground chat settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Model used for chat.
    pub model: String,
    /// Number of past exchanges kept in the prompt.
    pub memory_window: usize,
    pub sampling: SamplingParams,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            memory_window: 3,
            sampling: SamplingParams {
                temperature: 0.3,
                max_tokens: 500,
                ..SamplingParams::deterministic()
            },
        }
    }
}

/// Object store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory backing the local object bucket. Defaults to
    /// `<data_dir>/bucket`.
    pub bucket_dir: Option<String>,
    /// Prefix for transcripts and their summaries.
    pub transcript_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            bucket_dir: None,
            transcript_prefix: "transcripts".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::OwlError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Configuration file to use: `explicit` if given, else the default.
    pub fn config_path(explicit: Option<&str>) -> PathBuf {
        match explicit {
            Some(path) => Self::expand_path(path),
            None => Self::default_config_path(),
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("owl")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded bucket directory path.
    pub fn bucket_dir(&self) -> PathBuf {
        match &self.storage.bucket_dir {
            Some(dir) => Self::expand_path(dir),
            None => self.data_dir().join("bucket"),
        }
    }
}
