//! Integration tests for error types

#[cfg(test)]
mod tests {
    use apack_errors::*;

    #[test]
    fn test_error_conversion() {
        let net_err = NetworkError::Timeout {
            url: "https://example.com".into(),
        };
        let err: Error = net_err.into();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::NotFound {
            path: "conf.yaml".into(),
        };
        assert_eq!(err.to_string(), "cannot access config file: conf.yaml");
    }

    #[test]
    fn test_error_clone() {
        let err = VenvError::EnvironmentMissing {
            path: "/tmp/env".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
    }

    #[test]
    fn test_exit_code_taxonomy() {
        // The exit code is the external contract: calling scripts branch
        // on it, so each failure class must keep its documented code.
        let cases: Vec<(Error, i32)> = vec![
            (
                VenvError::CreationFailed {
                    path: "/tmp/env".into(),
                    message: "interpreter missing".into(),
                }
                .into(),
                1,
            ),
            (
                VenvError::InstallFailed {
                    target: "nonexistent-module".into(),
                    message: "not found".into(),
                }
                .into(),
                2,
            ),
            (
                OpsError::EnvironmentExists {
                    path: "/tmp/env".into(),
                }
                .into(),
                2,
            ),
            (
                NetworkError::HttpError {
                    status: 404,
                    url: "http://example.com/x.tar.gz".into(),
                }
                .into(),
                3,
            ),
            (
                OpsError::ArtifactExists {
                    path: "/tmp/agent.tar.gz".into(),
                }
                .into(),
                9,
            ),
            (
                ArchiveError::SourceMissing {
                    path: "missing".into(),
                }
                .into(),
                10,
            ),
            (
                NetworkError::InvalidUrl("something".into()).into(),
                1,
            ),
        ];

        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "wrong exit code for {err}");
        }
    }

    #[test]
    fn test_user_hint_present_for_preconditions() {
        let err: Error = OpsError::EnvironmentExists {
            path: "/tmp/env".into(),
        }
        .into();
        assert!(err.user_hint().unwrap().contains("--force"));
    }
}
