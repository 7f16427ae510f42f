//! Clean command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::storage::{LocalObjectStore, ObjectStore};
use anyhow::Result;

/// Run the clean command.
pub async fn run_clean(prefix: &str, settings: Settings) -> Result<()> {
    if prefix.trim().is_empty() {
        Output::error("Refusing to delete with an empty prefix.");
        return Ok(());
    }

    if let Err(e) = preflight::check(Operation::Storage, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let store = LocalObjectStore::new(&settings.bucket_dir())?;
    let deleted = store.delete_prefix(prefix).await?;

    if deleted == 0 {
        Output::info(&format!("Nothing stored under '{}'.", prefix));
    } else {
        Output::success(&format!("Deleted {} objects under '{}'.", deleted, prefix));
    }

    Ok(())
}
