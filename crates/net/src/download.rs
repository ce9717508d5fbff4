//! File download with progress reporting

use apack_errors::{Error, NetworkError};
use apack_events::{Event, EventEmitter, EventSender};
use futures::StreamExt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::NetClient;

/// Download operation handle
#[derive(Debug)]
pub struct Download {
    url: Url,
}

/// Result of a download operation
#[derive(Debug)]
pub struct DownloadResult {
    pub url: String,
    pub size: u64,
}

impl Download {
    /// Create a new download
    ///
    /// # Errors
    ///
    /// Returns an error if the provided URL is invalid or cannot be parsed.
    pub fn new(url: &str) -> Result<Self, Error> {
        let url = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;
        Ok(Self { url })
    }

    /// Execute the download
    ///
    /// The body streams into `dest` with a `.part` suffix and is renamed
    /// into place only after the last byte arrived, so a failed download
    /// never leaves a half-written artifact at `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the server returns a
    /// non-success status, the destination cannot be created (missing
    /// parent directory, no write permission), or the transfer aborts.
    pub async fn execute(
        self,
        client: &NetClient,
        dest: &Path,
        tx: &EventSender,
    ) -> Result<DownloadResult, Error> {
        let url_str = self.url.to_string();

        let response = client.get(url_str.as_str()).await?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: url_str,
            }
            .into());
        }

        let content_length = response.content_length();

        tx.emit(Event::DownloadStarted {
            url: url_str.clone(),
            size: content_length,
        });

        // The destination parent must already exist; a missing directory
        // is the caller's error and surfaces as the OS message.
        let temp_path = dest.with_extension("part");
        let mut file = File::create(&temp_path)
            .await
            .map_err(|e| Error::io_with_path(&e, dest))?;

        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    drop(file);
                    let _ = tokio::fs::remove_file(&temp_path).await;
                    return Err(Self::map_stream_error(&e, &url_str));
                }
            };

            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(total) = content_length {
                tx.emit(Event::DownloadProgress {
                    url: url_str.clone(),
                    bytes_downloaded: downloaded,
                    total_bytes: total,
                });
            }
        }

        file.flush().await?;
        drop(file);

        tokio::fs::rename(&temp_path, dest).await?;

        tx.emit(Event::DownloadCompleted {
            url: url_str.clone(),
            size: downloaded,
        });

        Ok(DownloadResult {
            url: url_str,
            size: downloaded,
        })
    }

    fn map_stream_error(error: &reqwest::Error, url: &str) -> Error {
        if error.is_timeout() {
            NetworkError::Timeout {
                url: url.to_string(),
            }
            .into()
        } else if error.is_connect() {
            NetworkError::ConnectionFailed(error.to_string()).into()
        } else {
            NetworkError::DownloadFailed(error.to_string()).into()
        }
    }
}
