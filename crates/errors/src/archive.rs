//! Archive error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArchiveError {
    #[error("source directory not found: {path}")]
    SourceMissing { path: String },

    #[error("failed to create archive {path}: {message}")]
    CreateFailed { path: String, message: String },

    #[error("failed to extract archive {path}: {message}")]
    ExtractFailed { path: String, message: String },
}

impl UserFacingError for ArchiveError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SourceMissing { .. } => Some("The directory to archive must exist."),
            Self::CreateFailed { .. } => Some("Ensure the destination path is writable."),
            Self::ExtractFailed { .. } => Some("The downloaded archive may be corrupt."),
        }
    }

    fn exit_code(&self) -> i32 {
        10
    }
}
