//! Integration tests for config loading and spec validation

use apack_config::{ColorChoice, Config, OutputFormat, PackageSpec};
use apack_errors::{ConfigError, Error};
use std::path::Path;

const SPEC_YAML: &str = r"
distribution: Ubuntu
venv: /tmp/agent/env
output_tar: /tmp/agent/package.tar.gz
python: /usr/bin/python3
manager: https://example.com/manager/archive.tar.gz
core_modules:
  - xmltodict
  - requests
core_plugins:
  - script-plugin
additional_modules:
  - pyyaml
";

#[tokio::test]
async fn test_load_spec_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("config.yaml");
    tokio::fs::write(&path, SPEC_YAML).await.unwrap();

    let spec = PackageSpec::load(&path).await.unwrap();
    assert_eq!(spec.distribution, "Ubuntu");
    assert_eq!(spec.venv, Path::new("/tmp/agent/env"));
    assert_eq!(spec.output_tar, Path::new("/tmp/agent/package.tar.gz"));
    assert_eq!(
        spec.modules().collect::<Vec<_>>(),
        vec!["xmltodict", "requests", "script-plugin", "pyyaml"]
    );
}

#[tokio::test]
async fn test_load_missing_spec_is_access_error() {
    let err = PackageSpec::load(Path::new("/nonexistent/config.yaml"))
        .await
        .unwrap_err();

    // A missing file must never be reported as a parse error.
    match err {
        Error::Config(ConfigError::NotFound { .. }) => {}
        other => panic!("expected NotFound, got {other}"),
    }
    assert!(err.to_string().contains("cannot access config file"));
}

#[test]
fn test_malformed_spec_carries_parser_message() {
    let err = PackageSpec::from_yaml("distribution: [unclosed").unwrap_err();
    match err {
        Error::Config(ConfigError::ParseError { message }) => {
            assert!(!message.is_empty());
        }
        other => panic!("expected ParseError, got {other}"),
    }
}

#[test]
fn test_empty_spec_rejected() {
    let err = PackageSpec::from_yaml("").unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_non_mapping_spec_rejected() {
    for doc in ["- a\n- b\n", "just a string\n", "42\n"] {
        let err = PackageSpec::from_yaml(doc).unwrap_err();
        assert!(
            matches!(err, Error::Config(ConfigError::ParseError { .. })),
            "document {doc:?} should be rejected as a non-mapping"
        );
    }
}

#[test]
fn test_missing_required_field() {
    let err = PackageSpec::from_yaml("distribution: Ubuntu\nvenv: /tmp/env\n").unwrap_err();
    match err {
        Error::Config(ConfigError::MissingField { field }) => {
            assert_eq!(field, "output_tar");
        }
        other => panic!("expected MissingField, got {other}"),
    }
}

#[test]
fn test_spec_round_trip_preserves_declared_keys() {
    let spec = PackageSpec::from_yaml(SPEC_YAML).unwrap();
    let serialized = spec.to_yaml().unwrap();
    let reloaded = PackageSpec::from_yaml(&serialized).unwrap();

    assert_eq!(reloaded.distribution, spec.distribution);
    assert_eq!(reloaded.venv, spec.venv);
    assert_eq!(reloaded.output_tar, spec.output_tar);
    assert_eq!(reloaded.python, spec.python);
    assert_eq!(reloaded.manager, spec.manager);
    assert_eq!(reloaded.core_modules, spec.core_modules);
    assert_eq!(reloaded.core_plugins, spec.core_plugins);
    assert_eq!(reloaded.additional_modules, spec.additional_modules);
}

#[tokio::test]
async fn test_tool_config_defaults_when_file_absent() {
    let config = Config::default();
    assert_eq!(config.network.timeout, 300);
    assert_eq!(config.network.connect_timeout, 30);
    assert_eq!(config.general.default_output, OutputFormat::Tty);
    assert_eq!(config.general.color, ColorChoice::Auto);
}

#[tokio::test]
async fn test_tool_config_load_from_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("config.toml");
    tokio::fs::write(
        &path,
        "[network]\ntimeout = 60\n\n[general]\ncolor = \"never\"\n",
    )
    .await
    .unwrap();

    let config = Config::load_from_file(&path).await.unwrap();
    assert_eq!(config.network.timeout, 60);
    assert_eq!(config.network.connect_timeout, 30);
    assert_eq!(config.general.color, ColorChoice::Never);
}

#[tokio::test]
async fn test_tool_config_invalid_toml() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("config.toml");
    tokio::fs::write(&path, "network = not toml").await.unwrap();

    let err = Config::load_from_file(&path).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::ParseError { .. })
    ));
}
