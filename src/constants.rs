//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default artifact location, only edit this file.

use std::path::{Path, PathBuf};

/// App name
pub const APP_NAME: &str = "Severity Core";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bundle file name inside the per-user data directory
pub const DEFAULT_MODEL_FILE: &str = "severity_model.json";

/// Repo-local default artifact path
pub const DEFAULT_MODEL_PATH: &str = "models/severity_model.json";

/// Environment override for the artifact path
pub const MODEL_PATH_ENV: &str = "SEVERITY_MODEL_PATH";

// ============================================
// Helper functions to resolve configuration
// ============================================

/// Resolve the model artifact path: CLI flag, then environment variable,
/// then the per-user data directory, then the repo-local default.
///
/// Resolution only picks a path; whether anything usable lives there is the
/// engine's call, and a missing artifact aborts startup.
pub fn resolve_model_path(cli_override: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_override {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(MODEL_PATH_ENV) {
        return PathBuf::from(path);
    }

    if let Some(data_dir) = dirs::data_dir() {
        let candidate = data_dir.join("severity-core").join(DEFAULT_MODEL_FILE);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(DEFAULT_MODEL_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override_wins() {
        let path = resolve_model_path(Some(Path::new("/tmp/custom.json")));
        assert_eq!(path, PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn test_default_path_without_override() {
        // No CLI flag and (normally) no env var set in tests: falls through
        // to a concrete path rather than erroring.
        let path = resolve_model_path(None);
        assert!(path.to_string_lossy().ends_with(DEFAULT_MODEL_FILE));
    }
}
