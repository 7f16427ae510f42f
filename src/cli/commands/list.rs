//! List command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::storage::{LocalObjectStore, ObjectStore};
use anyhow::Result;

/// Run the list command.
pub async fn run_list(summaries: bool, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Storage, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let store = LocalObjectStore::new(&settings.bucket_dir())?;
    let prefix = format!("{}/", settings.storage.transcript_prefix);

    let objects: Vec<_> = match store.list(&prefix).await {
        Ok(objects) => objects
            .into_iter()
            .filter(|o| if summaries { o.is_summary() } else { o.is_transcript() })
            .collect(),
        Err(e) => {
            Output::error(&format!("Failed to list objects: {}", e));
            return Err(e.into());
        }
    };

    let kind = if summaries { "summaries" } else { "transcripts" };

    if objects.is_empty() {
        Output::info(&format!("No {} stored yet.", kind));
        return Ok(());
    }

    Output::header(&format!("Stored {} ({})", kind, objects.len()));
    println!();
    for object in &objects {
        Output::object_info(object);
    }

    Ok(())
}
