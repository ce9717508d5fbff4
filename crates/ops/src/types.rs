//! Result types reported back to the CLI

use apack_errors::{Error, OpsError};
use serde::Serialize;
use std::path::PathBuf;

/// Result of a successful `create` run, serializable for CLI output
#[derive(Clone, Debug, Serialize)]
pub struct PackageReport {
    /// Distribution the package was built for
    pub distribution: String,
    /// Path of the produced tarball
    pub package_path: PathBuf,
    /// Environment directory that was archived
    pub venv_path: PathBuf,
    /// Modules installed into the environment, as reported by pip
    pub modules: Vec<String>,
    /// Plugin sources installed from the manager archive
    pub plugins: Vec<String>,
    /// Wall-clock duration of the build in milliseconds
    pub duration_ms: u64,
}

impl PackageReport {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| {
            OpsError::SerializationError {
                message: e.to_string(),
            }
            .into()
        })
    }
}
