//! `.env` loading

use std::path::{Path, PathBuf};

/// Load variables from a `.env` file in the current directory or its parents
///
/// Returns the path of the file that was loaded. A missing file is not an
/// error; variables already present in the process environment are kept.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse .env file");
            None
        }
    }
}

/// Load variables from a specific env file
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<(), dotenvy::Error> {
    dotenvy::from_path(path.as_ref())
}
