#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! External command execution for apack
//!
//! Commands run through `sh -c` with captured output. A non-zero exit is a
//! normal, inspectable result - the caller decides what it means. The only
//! error path is the shell itself failing to spawn.

use apack_errors::{Error, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one external command invocation
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code; `sh` reports an unresolvable command as 127
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Run a shell command line and capture its output
///
/// # Errors
///
/// Returns an error only if the shell cannot be spawned. A failing
/// command (including "command not found", code 127) is returned as a
/// normal `ProcessOutput`.
pub async fn run(command: &str) -> Result<ProcessOutput> {
    run_in(command, None).await
}

/// Run a shell command line in a working directory
///
/// # Errors
///
/// Returns an error only if the shell cannot be spawned.
pub async fn run_in(command: &str, working_dir: Option<&Path>) -> Result<ProcessOutput> {
    debug!(command, "executing shell command");

    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    let output = cmd
        .output()
        .await
        .map_err(|e| Error::internal(format!("failed to spawn shell: {e}")))?;

    // Terminated-by-signal has no code; report -1 so callers still get
    // a non-zero result to branch on.
    let result = ProcessOutput {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    debug!(code = result.code, "shell command finished");
    Ok(result)
}
