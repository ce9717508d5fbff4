#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Python virtual environment management for apack
//!
//! Creation and installs delegate to the external `virtualenv` and `pip`
//! tools; this crate owns the command lines, the status checks and the
//! error mapping. It never removes an existing environment - force
//! semantics belong to the orchestrator.

use apack_errors::{Error, VenvError};
use apack_events::{Event, EventEmitter, EventSender};
use std::path::{Path, PathBuf};

/// Manager for one isolated Python environment
pub struct VenvManager {
    path: PathBuf,
    tx: EventSender,
}

impl EventEmitter for VenvManager {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

impl VenvManager {
    /// Create a manager for the environment at `path`
    #[must_use]
    pub fn new(path: PathBuf, tx: EventSender) -> Self {
        Self { path, tx }
    }

    /// The environment directory
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the environment's pip executable
    #[must_use]
    pub fn pip_path(&self) -> PathBuf {
        self.path.join("bin").join("pip")
    }

    /// Path of the environment's interpreter
    #[must_use]
    pub fn python_path(&self) -> PathBuf {
        self.path.join("bin").join("python")
    }

    /// Create the virtual environment
    ///
    /// # Errors
    ///
    /// Returns `VenvError::CreationFailed` if the interpreter is missing,
    /// the path cannot be created, or `virtualenv` exits non-zero.
    pub async fn create(&self, interpreter: Option<&Path>) -> Result<(), Error> {
        self.emit(Event::VenvCreating {
            path: self.path.clone(),
        });

        let command = match interpreter {
            Some(python) => format!(
                "virtualenv --python {} {}",
                python.display(),
                self.path.display()
            ),
            None => format!("virtualenv {}", self.path.display()),
        };

        let output = apack_exec::run(&command).await?;
        if !output.success() {
            return Err(VenvError::CreationFailed {
                path: self.path.display().to_string(),
                message: failure_detail(&output),
            }
            .into());
        }

        self.emit(Event::VenvCreated {
            path: self.path.clone(),
        });

        Ok(())
    }

    /// Install a named module into the environment
    ///
    /// # Errors
    ///
    /// Returns `VenvError::EnvironmentMissing` if the environment has no
    /// pip, or `VenvError::InstallFailed` if the module cannot be resolved
    /// or the install exits non-zero.
    pub async fn install_module(&self, name: &str) -> Result<(), Error> {
        self.emit(Event::ModuleInstalling {
            name: name.to_string(),
        });

        self.pip_install(name).await?;

        self.emit(Event::ModuleInstalled {
            name: name.to_string(),
        });

        Ok(())
    }

    /// Install a source directory into the environment
    ///
    /// # Errors
    ///
    /// Returns `VenvError::InstallFailed` if the source does not exist or
    /// pip rejects it.
    pub async fn install_source(&self, source: &Path) -> Result<(), Error> {
        let name = source
            .file_name()
            .map_or_else(|| source.display().to_string(), |n| n.to_string_lossy().into_owned());

        self.emit(Event::PluginInstalling {
            name: name.clone(),
            source: source.to_path_buf(),
        });

        if !source.exists() {
            return Err(VenvError::InstallFailed {
                target: source.display().to_string(),
                message: "source path does not exist".to_string(),
            }
            .into());
        }

        self.pip_install(&source.display().to_string()).await?;

        self.emit(Event::PluginInstalled { name });

        Ok(())
    }

    /// List installed modules (`pip freeze`)
    ///
    /// # Errors
    ///
    /// Returns `VenvError::EnvironmentMissing` if the environment has no
    /// pip, or `VenvError::InstallFailed` if the listing itself fails.
    pub async fn installed_modules(&self) -> Result<Vec<String>, Error> {
        self.ensure_environment()?;

        let command = format!("{} freeze", self.pip_path().display());
        let output = apack_exec::run(&command).await?;
        if !output.success() {
            return Err(VenvError::InstallFailed {
                target: "pip freeze".to_string(),
                message: failure_detail(&output),
            }
            .into());
        }

        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    async fn pip_install(&self, target: &str) -> Result<(), Error> {
        self.ensure_environment()?;

        let command = format!("{} install {}", self.pip_path().display(), target);
        let output = apack_exec::run(&command).await?;
        if !output.success() {
            return Err(VenvError::InstallFailed {
                target: target.to_string(),
                message: failure_detail(&output),
            }
            .into());
        }

        Ok(())
    }

    fn ensure_environment(&self) -> Result<(), Error> {
        if self.pip_path().exists() {
            Ok(())
        } else {
            Err(VenvError::EnvironmentMissing {
                path: self.path.display().to_string(),
            }
            .into())
        }
    }
}

/// Pick the most useful failure text from a finished command
fn failure_detail(output: &apack_exec::ProcessOutput) -> String {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        format!("exit code {}", output.code)
    } else {
        stderr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apack_errors::{Error, UserFacingError};

    #[tokio::test]
    async fn test_install_into_missing_environment() {
        let temp = tempfile::tempdir().unwrap();
        let (tx, _rx) = apack_events::channel();
        let venv = VenvManager::new(temp.path().join("no-env"), tx);

        let err = venv.install_module("xmltodict").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Venv(VenvError::EnvironmentMissing { .. })
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_install_source_requires_existing_path() {
        let temp = tempfile::tempdir().unwrap();
        let (tx, _rx) = apack_events::channel();
        let venv = VenvManager::new(temp.path().join("env"), tx);

        let err = venv
            .install_source(&temp.path().join("missing-plugin"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Venv(VenvError::InstallFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_with_missing_interpreter_fails() {
        let temp = tempfile::tempdir().unwrap();
        let (tx, _rx) = apack_events::channel();
        let venv = VenvManager::new(temp.path().join("env"), tx);

        let err = venv
            .create(Some(Path::new("/usr/bin/missing_python")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Venv(VenvError::CreationFailed { .. })
        ));
        assert_eq!(err.exit_code(), 1);
    }
}
