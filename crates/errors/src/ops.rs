//! Pipeline orchestration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpsError {
    #[error("environment already exists at {path}")]
    EnvironmentExists { path: String },

    #[error("output artifact already exists: {path}")]
    ArtifactExists { path: String },

    #[error("plugin source {name} not found in manager archive at {path}")]
    PluginSourceMissing { name: String, path: String },

    #[error("component not found: {component}")]
    MissingComponent { component: String },

    #[error("serialization error: {message}")]
    SerializationError { message: String },

    #[error("event channel closed")]
    EventChannelClosed,
}

impl UserFacingError for OpsError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::EnvironmentExists { .. } => {
                Some("Pass --force to remove and recreate the environment.")
            }
            Self::ArtifactExists { .. } => {
                Some("Remove the existing tarball; --force does not overwrite artifacts.")
            }
            Self::PluginSourceMissing { .. } => {
                Some("The manager archive does not have the expected plugin layout.")
            }
            _ => None,
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            Self::EnvironmentExists { .. } | Self::PluginSourceMissing { .. } => 2,
            Self::ArtifactExists { .. } => 9,
            _ => 1,
        }
    }
}
