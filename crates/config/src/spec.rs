//! Package spec parsing and validation
//!
//! The spec is the declarative input for one build: which distribution the
//! package targets, where the environment lives, which modules go into it
//! and where the result is written. Loaded once, immutable afterwards.

use apack_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Keys that every spec must declare
const REQUIRED_FIELDS: &[&str] = &["distribution", "venv", "output_tar"];

/// Declarative description of one agent package build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSpec {
    /// Target distribution name, recorded in the build report
    pub distribution: String,

    /// Directory the isolated environment is provisioned at
    pub venv: PathBuf,

    /// Path the gzip tarball is written to
    pub output_tar: PathBuf,

    /// Interpreter used for the environment (tool default when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<PathBuf>,

    /// Remote manager archive containing plugin sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,

    /// Modules installed into the environment, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub core_modules: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub core_plugins: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_modules: Vec<String>,
}

impl PackageSpec {
    /// Load and validate a spec file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the path cannot be read and
    /// `ConfigError::ParseError` / `ConfigError::MissingField` if the
    /// contents do not form a valid non-empty mapping.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        Self::from_yaml(&contents)
    }

    /// Parse a spec from YAML text
    ///
    /// The document must be a non-empty mapping; an empty file, a bare
    /// scalar or a sequence is rejected before field validation.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML, a non-mapping document, or a
    /// mapping that lacks one of the required keys.
    pub fn from_yaml(contents: &str) -> Result<Self, Error> {
        let value: serde_yml::Value =
            serde_yml::from_str(contents).map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })?;

        let mapping = match &value {
            serde_yml::Value::Mapping(mapping) if !mapping.is_empty() => mapping,
            _ => {
                return Err(ConfigError::ParseError {
                    message: "configuration is not a non-empty mapping".to_string(),
                }
                .into())
            }
        };

        for field in REQUIRED_FIELDS {
            let key = serde_yml::Value::String((*field).to_string());
            if !mapping.contains_key(&key) {
                return Err(ConfigError::MissingField {
                    field: (*field).to_string(),
                }
                .into());
            }
        }

        serde_yml::from_value(value)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// All modules to install, in declaration order
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.core_modules
            .iter()
            .chain(&self.core_plugins)
            .chain(&self.additional_modules)
            .map(String::as_str)
    }

    /// Serialize the spec back to YAML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, Error> {
        serde_yml::to_string(self)
            .map_err(|e| ConfigError::SerializeError {
                error: e.to_string(),
            })
            .map_err(Into::into)
    }
}
