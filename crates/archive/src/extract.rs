//! Archive extraction

use apack_errors::{ArchiveError, Error};
use apack_events::{Event, EventEmitter, EventSender};
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::Path;
use tar::Archive as TarArchive;
use tokio::task;

/// Extract a tar.gz archive to a destination directory
///
/// # Errors
///
/// Returns `ArchiveError::ExtractFailed` if the archive cannot be opened
/// or unpacked, or an I/O error if the destination cannot be created.
pub async fn extract_tar_gz(
    archive_path: &Path,
    dest_dir: &Path,
    tx: &EventSender,
) -> Result<(), Error> {
    tokio::fs::create_dir_all(dest_dir)
        .await
        .map_err(|e| Error::io_with_path(&e, dest_dir))?;

    tx.emit(Event::ArchiveExtracting {
        archive: archive_path.to_path_buf(),
        dest: dest_dir.to_path_buf(),
    });

    let archive_path = archive_path.to_path_buf();
    let dest_dir = dest_dir.to_path_buf();

    task::spawn_blocking(move || -> Result<(), Error> {
        let tar_gz = File::open(&archive_path).map_err(|e| ArchiveError::ExtractFailed {
            path: archive_path.display().to_string(),
            message: e.to_string(),
        })?;

        let tar = GzDecoder::new(tar_gz);
        let mut archive = TarArchive::new(tar);

        archive
            .unpack(&dest_dir)
            .map_err(|e| ArchiveError::ExtractFailed {
                path: archive_path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    })
    .await
    .map_err(|e| Error::internal(format!("extraction task failed: {e}")))?
}
