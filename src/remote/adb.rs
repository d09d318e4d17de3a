//! adb-backed implementation of [`RemoteFs`]
//!
//! Uses the system `adb` binary so the user's existing device pairing and
//! server configuration apply. One process spawn per operation; the sync
//! model is strictly sequential so there is nothing to pool.

use super::RemoteFs;
use crate::config::Direction;
use crate::types::SyncError;
use std::process::Command;

/// Device bridge backed by `adb` subprocess invocations.
pub struct AdbShell {
    program: String,
}

impl AdbShell {
    pub fn new() -> Self {
        Self {
            program: "adb".to_string(),
        }
    }

    /// Use a different bridge binary (e.g. a full path to adb).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run adb with `args` and return stdout, failing on a non-zero exit.
    fn output(&self, args: &[&str]) -> Result<String, SyncError> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| SyncError::RemoteCommand(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(SyncError::RemoteCommand(trimmed_diagnostic(
                &output.stdout,
                &output.stderr,
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for AdbShell {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteFs for AdbShell {
    fn stat(&self, path: &str) -> Result<String, SyncError> {
        self.output(&["shell", "stat", "-c", "%s,%Y", &quoted(path)])
    }

    fn digest(&self, path: &str) -> Result<String, SyncError> {
        self.output(&["shell", "sha256sum", &quoted(path)])
    }

    fn list(&self, root: &str) -> Result<String, SyncError> {
        self.output(&["shell", "ls", "-R", &quoted(root)])
    }

    fn copy(&self, direction: Direction, source: &str, dest: &str) -> Result<(), SyncError> {
        self.output(&[direction.adb_subcommand(), source, dest])
            .map(|_| ())
    }

    fn remove(&self, path: &str) -> Result<(), SyncError> {
        // `rm -r` is passed as one shell word, matching how the remote shell
        // re-splits its command line.
        self.output(&["shell", "rm -r", &quoted(path)]).map(|_| ())
    }
}

/// Quote a device path for the remote shell so spaces survive the re-split.
fn quoted(path: &str) -> String {
    format!("\"{}\"", path)
}

/// Collapse command output into one trimmed diagnostic line, preferring
/// stderr when it has content.
fn trimmed_diagnostic(stdout: &[u8], stderr: &[u8]) -> String {
    let err = String::from_utf8_lossy(stderr);
    let err = err.trim();
    if !err.is_empty() {
        return err.to_string();
    }
    String::from_utf8_lossy(stdout).trim().to_string()
}
