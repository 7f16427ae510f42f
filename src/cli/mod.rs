//! CLI module for Owl.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Owl - Chunked Document Summarization
///
/// Summarize long documents and transcripts with hosted language models,
/// and chat with those models from the terminal.
#[derive(Parser, Debug)]
#[command(name = "owl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a text document or a stored transcript
    Summarize {
        /// Path to a text or PDF file, or an object name with --stored
        input: String,

        /// Treat input as an object name in the bucket
        #[arg(long)]
        stored: bool,

        /// LLM model to use for both passes
        #[arg(short, long)]
        model: Option<String>,

        /// Maximum tokens per chunk
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Tokenizer (encoding or model name)
        #[arg(long)]
        tokenizer: Option<String>,

        /// Write the summary to a file ("-" for stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Store the summary next to the transcripts in the bucket
        #[arg(long)]
        save: bool,
    },

    /// Convert a speech job's JSON output into a stored transcript
    Transcript {
        /// Path to the speech result JSON
        input: String,

        /// Model type appended to the transcript name
        #[arg(long, default_value = "")]
        model_type: String,

        /// Name of the source audio (defaults to the JSON file name)
        #[arg(long)]
        source: Option<String>,
    },

    /// List stored transcripts (or summaries)
    List {
        /// List summaries instead of transcripts
        #[arg(long)]
        summaries: bool,
    },

    /// Print a stored object
    Show {
        /// Object name (e.g. transcripts/call.mp3summary.txt)
        name: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Delete every stored object under a prefix
    Clean {
        /// Object name prefix (e.g. "uploads/")
        prefix: String,
    },

    /// Start an interactive chat session
    Chat {
        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Number of past exchanges to remember
        #[arg(short, long)]
        window: Option<usize>,

        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f32>,

        /// Nucleus sampling probability mass
        #[arg(long)]
        top_p: Option<f32>,

        /// Top-k sampling (0 disables)
        #[arg(long)]
        top_k: Option<u32>,

        /// Maximum tokens in each reply
        #[arg(long)]
        max_tokens: Option<u32>,

        /// Frequency penalty
        #[arg(long, allow_negative_numbers = true)]
        frequency_penalty: Option<f32>,

        /// Presence penalty
        #[arg(long, allow_negative_numbers = true)]
        presence_penalty: Option<f32>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration file if it does not exist
    Init,

    /// Show configuration file path
    Path,
}
