//! Gzip tarball creation

use apack_errors::{ArchiveError, Error};
use apack_events::{Event, EventEmitter, EventSender};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::{Path, PathBuf};
use tokio::task;

/// Pack a directory tree into a gzip-compressed tarball
///
/// Entries are rooted at the source directory's basename, so archiving
/// `/work/env` yields members like `env/bin/python`.
///
/// # Errors
///
/// Returns `ArchiveError::SourceMissing` if `source_dir` is not an
/// existing directory and `ArchiveError::CreateFailed` if the destination
/// cannot be created or written.
pub async fn create_tar_gz(
    source_dir: &Path,
    dest: &Path,
    tx: &EventSender,
) -> Result<(), Error> {
    if !source_dir.is_dir() {
        return Err(ArchiveError::SourceMissing {
            path: source_dir.display().to_string(),
        }
        .into());
    }

    let root = source_dir
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| ArchiveError::SourceMissing {
            path: source_dir.display().to_string(),
        })?;

    tx.emit(Event::ArchiveCreating {
        source: source_dir.to_path_buf(),
        dest: dest.to_path_buf(),
    });

    let source_dir = source_dir.to_path_buf();
    let dest_path = dest.to_path_buf();

    task::spawn_blocking(move || -> Result<(), Error> {
        let file = File::create(&dest_path).map_err(|e| ArchiveError::CreateFailed {
            path: dest_path.display().to_string(),
            message: e.to_string(),
        })?;

        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.follow_symlinks(false);

        builder
            .append_dir_all(&root, &source_dir)
            .map_err(|e| ArchiveError::CreateFailed {
                path: dest_path.display().to_string(),
                message: e.to_string(),
            })?;

        let encoder = builder
            .into_inner()
            .map_err(|e| ArchiveError::CreateFailed {
                path: dest_path.display().to_string(),
                message: e.to_string(),
            })?;

        encoder.finish().map_err(|e| ArchiveError::CreateFailed {
            path: dest_path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    })
    .await
    .map_err(|e| Error::internal(format!("tar creation task failed: {e}")))??;

    let size = tokio::fs::metadata(dest).await.map_or(0, |m| m.len());
    tx.emit(Event::ArchiveCreated {
        dest: dest.to_path_buf(),
        size,
    });

    Ok(())
}
