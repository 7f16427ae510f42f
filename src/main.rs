//! Owl CLI entry point.

use anyhow::Result;
use clap::Parser;
use owl::cli::commands::{self, ChatArgs, SummarizeArgs};
use owl::cli::{Cli, Commands};
use owl::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = Settings::config_path(cli.config.as_deref());
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("owl={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    std::fs::create_dir_all(settings.data_dir())?;

    match cli.command {
        Commands::Summarize {
            input,
            stored,
            model,
            chunk_size,
            tokenizer,
            output,
            save,
        } => {
            let args = SummarizeArgs {
                input,
                stored,
                model,
                chunk_size,
                tokenizer,
                output,
                save,
            };
            commands::run_summarize(args, settings).await?;
        }

        Commands::Transcript {
            input,
            model_type,
            source,
        } => {
            commands::run_transcript(&input, &model_type, source, settings).await?;
        }

        Commands::List { summaries } => {
            commands::run_list(summaries, settings).await?;
        }

        Commands::Show { name, output } => {
            commands::run_show(&name, output, settings).await?;
        }

        Commands::Clean { prefix } => {
            commands::run_clean(&prefix, settings).await?;
        }

        Commands::Chat {
            model,
            window,
            temperature,
            top_p,
            top_k,
            max_tokens,
            frequency_penalty,
            presence_penalty,
        } => {
            let args = ChatArgs {
                model,
                window,
                temperature,
                top_p,
                top_k,
                max_tokens,
                frequency_penalty,
                presence_penalty,
            };
            commands::run_chat(args, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, &config_path, settings)?;
        }
    }

    Ok(())
}
