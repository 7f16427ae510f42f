//! Error types for Owl.

use thiserror::Error;

/// Library-level error type for Owl operations.
#[derive(Error, Debug)]
pub enum OwlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Transport-level failure talking to the completion endpoint
    /// (network, timeout, auth, HTTP status).
    #[error("Completion request failed: {0}")]
    Completion(String),

    /// The endpoint answered, but the answer lacked the expected text.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Object store error: {0}")]
    Storage(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Owl operations.
pub type Result<T> = std::result::Result<T, OwlError>;
