//! Python environment error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VenvError {
    #[error("failed to create environment at {path}: {message}")]
    CreationFailed { path: String, message: String },

    #[error("environment not found at {path}")]
    EnvironmentMissing { path: String },

    #[error("failed to install {target}: {message}")]
    InstallFailed { target: String, message: String },
}

impl UserFacingError for VenvError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::CreationFailed { .. } => {
                Some("Check that virtualenv and the configured interpreter are installed.")
            }
            Self::EnvironmentMissing { .. } => {
                Some("Create the environment before installing into it.")
            }
            Self::InstallFailed { .. } => {
                Some("Verify the module name or source path and that it can be resolved.")
            }
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            Self::CreationFailed { .. } => 1,
            Self::EnvironmentMissing { .. } | Self::InstallFailed { .. } => 2,
        }
    }
}
