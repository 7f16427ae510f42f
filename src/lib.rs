//! Owl - Chunked Document Summarization
//!
//! A CLI and library for summarizing long documents and speech transcripts
//! with hosted language models, and for chatting with those models.
//!
//! # Overview
//!
//! Owl allows you to:
//! - Summarize arbitrarily long text by splitting it into token-bounded chunks
//! - Turn speech-service JSON output into plain transcripts
//! - Keep transcripts and summaries in a local object bucket
//! - Chat with a model through a windowed conversation memory
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `chunking` - Token-aware chunking
//! - `completion` - Text-completion client abstraction
//! - `summarizer` - Multi-pass summarization pipeline
//! - `storage` - Object store for transcripts and summaries
//! - `document` - Document loading and transcript formatting
//! - `chat` - Playground chat sessions
//!
//! # Example
//!
//! ```rust,no_run
//! use owl::config::Settings;
//! use owl::summarizer::Summarizer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let summarizer = Summarizer::from_settings(&settings)?;
//!
//!     let report = summarizer.summarize("A very long document...").await?;
//!     println!("{}", report.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod chunking;
pub mod cli;
pub mod completion;
pub mod config;
pub mod document;
pub mod error;
pub mod storage;
pub mod summarizer;

pub use error::{OwlError, Result};
