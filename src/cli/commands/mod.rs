//! CLI command implementations.

mod chat;
mod clean;
mod config;
mod list;
mod show;
mod summarize;
mod transcript;

pub use chat::{run_chat, ChatArgs};
pub use clean::run_clean;
pub use config::run_config;
pub use list::run_list;
pub use show::run_show;
pub use summarize::{run_summarize, SummarizeArgs};
pub use transcript::run_transcript;
