//! Show command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::OwlError;
use crate::storage::{LocalObjectStore, ObjectStore};
use anyhow::Result;

/// Run the show command.
pub async fn run_show(name: &str, output: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Storage, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let store = LocalObjectStore::new(&settings.bucket_dir())?;

    let text = match store.get_text(name).await {
        Ok(text) => text,
        Err(e @ OwlError::ObjectNotFound(_)) => {
            Output::error(&format!("No stored object named {}", name));
            Output::info("Use 'owl list' or 'owl list --summaries' to see stored objects.");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    match output {
        Some(path) if path != "-" => {
            std::fs::write(&path, &text)?;
            Output::success(&format!("Wrote {} to {}", name, path));
        }
        _ => println!("{}", text),
    }

    Ok(())
}
