//! Integration tests for the create pipeline
//!
//! These exercise the precondition checks, which must fail before any
//! external tool is invoked, so they run without virtualenv or network.

use apack_config::{Config, PackageSpec};
use apack_errors::{Error, OpsError, UserFacingError};
use apack_net::NetClient;
use apack_ops::{create, OpsCtxBuilder, OpsCtx};
use std::path::Path;

fn spec_for(base: &Path) -> PackageSpec {
    PackageSpec::from_yaml(&format!(
        "distribution: Ubuntu\nvenv: {base}/env\noutput_tar: {base}/agent.tar.gz\n",
        base = base.display()
    ))
    .unwrap()
}

fn ctx_with(spec: PackageSpec, force: bool) -> OpsCtx {
    let (tx, _rx) = apack_events::channel();
    OpsCtxBuilder::new()
        .with_spec(spec)
        .with_config(Config::default())
        .with_net(NetClient::with_defaults().unwrap())
        .with_event_sender(tx)
        .with_force(force)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_existing_venv_without_force() {
    let temp = tempfile::tempdir().unwrap();
    let spec = spec_for(temp.path());

    // Pre-existing environment with a sentinel file
    tokio::fs::create_dir_all(&spec.venv).await.unwrap();
    tokio::fs::write(spec.venv.join("sentinel"), "keep me")
        .await
        .unwrap();

    let ctx = ctx_with(spec.clone(), false);
    let err = create(&ctx).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Ops(OpsError::EnvironmentExists { .. })
    ));
    assert_eq!(err.exit_code(), 2);

    // The pre-existing environment must not be touched.
    assert!(spec.venv.join("sentinel").exists());
}

#[tokio::test]
async fn test_existing_output_tar_fails_regardless_of_force() {
    let temp = tempfile::tempdir().unwrap();
    let spec = spec_for(temp.path());

    tokio::fs::write(&spec.output_tar, "CONTENT").await.unwrap();

    for force in [false, true] {
        let ctx = ctx_with(spec.clone(), force);
        let err = create(&ctx).await.unwrap_err();

        assert!(
            matches!(err, Error::Ops(OpsError::ArtifactExists { .. })),
            "force={force} should still fail on the existing artifact"
        );
        assert_eq!(err.exit_code(), 9);
    }

    // The existing artifact stays as it was.
    assert_eq!(
        tokio::fs::read_to_string(&spec.output_tar).await.unwrap(),
        "CONTENT"
    );
}

#[tokio::test]
async fn test_artifact_check_runs_before_force_clears_env() {
    let temp = tempfile::tempdir().unwrap();
    let spec = spec_for(temp.path());

    tokio::fs::create_dir_all(&spec.venv).await.unwrap();
    tokio::fs::write(spec.venv.join("sentinel"), "keep me")
        .await
        .unwrap();
    tokio::fs::write(&spec.output_tar, "CONTENT").await.unwrap();

    let ctx = ctx_with(spec.clone(), true);
    let err = create(&ctx).await.unwrap_err();

    assert!(matches!(err, Error::Ops(OpsError::ArtifactExists { .. })));

    // Even with force, nothing was deleted: the artifact precondition
    // aborts the build before the environment is cleared.
    assert!(spec.venv.join("sentinel").exists());
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let report = apack_ops::PackageReport {
        distribution: "Ubuntu".to_string(),
        package_path: "/tmp/agent.tar.gz".into(),
        venv_path: "/tmp/env".into(),
        modules: vec!["xmltodict==1.0".to_string()],
        plugins: vec!["plugin-installer".to_string()],
        duration_ms: 1234,
    };

    let json = report.to_json().unwrap();
    assert!(json.contains("\"distribution\": \"Ubuntu\""));
    assert!(json.contains("plugin-installer"));
}
