//! Network-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NetworkError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("connection timeout to {url}")]
    Timeout { url: String },

    #[error("HTTP error {status} for {url}")]
    HttpError { status: u16, url: String },

    #[error("download failed: {0}")]
    DownloadFailed(String),
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidUrl(_) => Some("Check the URL in the package configuration."),
            Self::ConnectionFailed(_) | Self::Timeout { .. } => {
                Some("Check network connectivity and the remote host.")
            }
            Self::HttpError { .. } => Some("Verify that the remote archive exists."),
            Self::DownloadFailed(_) => None,
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            // A well-formed URL pointing at a missing resource is an
            // operational precondition failure with its own code.
            Self::HttpError { .. } => 3,
            _ => 1,
        }
    }
}
