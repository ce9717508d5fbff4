//! Integration tests for archive creation and extraction

use apack_archive::{create_tar_gz, extract_tar_gz};
use apack_errors::{ArchiveError, Error, UserFacingError};
use apack_events::channel;
use flate2::read::GzDecoder;
use std::fs::File;
use tar::Archive;

#[tokio::test]
async fn test_tar_members_are_source_relative() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("dir");
    tokio::fs::create_dir_all(&source).await.unwrap();
    tokio::fs::write(source.join("content.file"), "CONTENT")
        .await
        .unwrap();

    let dest = temp.path().join("tar.file");
    let (tx, _rx) = channel();
    create_tar_gz(&source, &dest, &tx).await.unwrap();

    // Readable by the standard tar/gzip stack, members rooted at the
    // source directory's basename.
    let mut archive = Archive::new(GzDecoder::new(File::open(&dest).unwrap()));
    let members: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().display().to_string())
        .collect();

    assert!(
        members.iter().any(|m| m == "dir/content.file"),
        "members were {members:?}"
    );
}

#[tokio::test]
async fn test_tar_missing_source() {
    let temp = tempfile::tempdir().unwrap();
    let dest = temp.path().join("out.tar.gz");
    let (tx, _rx) = channel();

    let err = create_tar_gz(&temp.path().join("missing"), &dest, &tx)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Archive(ArchiveError::SourceMissing { .. })
    ));
    assert_eq!(err.exit_code(), 10);
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_tar_unwritable_destination() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("dir");
    tokio::fs::create_dir_all(&source).await.unwrap();
    tokio::fs::write(source.join("content.file"), "CONTENT")
        .await
        .unwrap();

    let (tx, _rx) = channel();
    let err = create_tar_gz(&source, &temp.path().join("no-such").join("out.tar.gz"), &tx)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Archive(ArchiveError::CreateFailed { .. })
    ));
    assert_eq!(err.exit_code(), 10);
}

#[tokio::test]
async fn test_extract_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("plugins");
    tokio::fs::create_dir_all(source.join("installer"))
        .await
        .unwrap();
    tokio::fs::write(source.join("installer").join("setup.py"), "# setup")
        .await
        .unwrap();

    let archive = temp.path().join("plugins.tar.gz");
    let (tx, _rx) = channel();
    create_tar_gz(&source, &archive, &tx).await.unwrap();

    let unpacked = temp.path().join("unpacked");
    extract_tar_gz(&archive, &unpacked, &tx).await.unwrap();

    let restored = unpacked.join("plugins").join("installer").join("setup.py");
    assert_eq!(
        tokio::fs::read_to_string(&restored).await.unwrap(),
        "# setup"
    );
}

#[tokio::test]
async fn test_extract_rejects_non_archive() {
    let temp = tempfile::tempdir().unwrap();
    let bogus = temp.path().join("bogus.tar.gz");
    tokio::fs::write(&bogus, "not a tarball").await.unwrap();

    let (tx, _rx) = channel();
    let err = extract_tar_gz(&bogus, &temp.path().join("out"), &tx)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Archive(ArchiveError::ExtractFailed { .. })
    ));
}
