//! Pre-flight checks before expensive operations.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{OwlError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Summarization calls the completion endpoint.
    Summarize,
    /// Chat calls the completion endpoint.
    Chat,
    /// Storage commands need a usable bucket directory.
    Storage,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Summarize => {
            check_api_key(settings)?;
            check_bucket_dir(settings)
        }
        Operation::Chat => check_api_key(settings),
        Operation::Storage => check_bucket_dir(settings),
    }
}

/// Check that the bucket path is a directory or can become one.
fn check_bucket_dir(settings: &Settings) -> Result<()> {
    let dir = settings.bucket_dir();
    if dir.exists() && !dir.is_dir() {
        return Err(OwlError::Config(format!(
            "Bucket path {} exists but is not a directory. Set storage.bucket_dir to a directory.",
            dir.display()
        )));
    }
    Ok(())
}

/// Check that the API key variable is set. Custom endpoints may run
/// without a key, so only the default endpoint requires one.
fn check_api_key(settings: &Settings) -> Result<()> {
    if settings.completion.api_base.is_some() {
        return Ok(());
    }

    let var = &settings.completion.api_key_env;
    match std::env::var(var) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(OwlError::Config(format!(
            "{} is empty. Set it with: export {}='sk-...'",
            var, var
        ))),
        Err(_) => Err(OwlError::Config(format!(
            "{} not set. Set it with: export {}='sk-...'",
            var, var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_accepts_missing_or_directory_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();

        settings.storage.bucket_dir = Some(dir.path().join("absent").display().to_string());
        assert!(check(Operation::Storage, &settings).is_ok());

        settings.storage.bucket_dir = Some(dir.path().display().to_string());
        assert!(check(Operation::Storage, &settings).is_ok());
    }

    #[test]
    fn test_storage_rejects_file_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bucket");
        std::fs::write(&file, b"not a directory").unwrap();

        let mut settings = Settings::default();
        settings.storage.bucket_dir = Some(file.display().to_string());

        let err = check(Operation::Storage, &settings).unwrap_err();
        assert!(matches!(err, OwlError::Config(_)));
    }

    #[test]
    fn test_missing_key_reported() {
        let mut settings = Settings::default();
        settings.completion.api_key_env = "OWL_PREFLIGHT_TEST_MISSING_KEY".to_string();

        let err = check(Operation::Summarize, &settings).unwrap_err();
        assert!(err.to_string().contains("OWL_PREFLIGHT_TEST_MISSING_KEY"));
    }

    #[test]
    fn test_custom_endpoint_skips_key_check() {
        let mut settings = Settings::default();
        settings.completion.api_key_env = "OWL_PREFLIGHT_TEST_MISSING_KEY".to_string();
        settings.completion.api_base = Some("http://localhost:8000/v1".to_string());

        assert!(check(Operation::Chat, &settings).is_ok());
    }
}
