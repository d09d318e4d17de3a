//! Transfer and removal side effects
//!
//! All mutation happens here. Under dry-run every operation is a no-op so
//! the orchestrator can report intended actions without touching either
//! tree.

use crate::config::{Direction, SyncOptions};
use crate::remote::{device_path, RemoteFs};
use crate::types::SyncError;
use camino::Utf8Path;
use std::fs;

/// Executes copies and removals for one sync run.
pub struct TransferExecutor<'a> {
    remote: &'a dyn RemoteFs,
    options: &'a SyncOptions,
}

impl<'a> TransferExecutor<'a> {
    pub fn new(remote: &'a dyn RemoteFs, options: &'a SyncOptions) -> Self {
        Self { remote, options }
    }

    /// Copy one file pair through the device bridge.
    ///
    /// For pull, the local destination's parent directory is created first;
    /// a failure there is `DirectoryCreation` and fatal to the run, since
    /// every later copy into that tree would fail the same way. Transfer
    /// failures themselves are non-fatal to the batch.
    pub fn copy(&self, source: &Utf8Path, dest: &Utf8Path) -> Result<(), SyncError> {
        if self.options.dry_run {
            return Ok(());
        }

        let direction = self.options.direction;
        if direction == Direction::Pull {
            self.ensure_parent_dir(dest)?;
        }

        let (bridge_source, bridge_dest) = match direction {
            Direction::Pull => (device_path(source), dest.to_string()),
            Direction::Push => (source.to_string(), device_path(dest)),
        };

        self.remote
            .copy(direction, &bridge_source, &bridge_dest)
            .map_err(|e| SyncError::Transfer {
                path: dest.to_string(),
                message: e.to_string(),
            })
    }

    /// Remove one orphaned destination path.
    ///
    /// Local removal for pull, remote `rm -r` for push. Non-fatal; the
    /// caller reports the failure and continues.
    pub fn remove(&self, path: &Utf8Path) -> Result<(), SyncError> {
        if self.options.dry_run {
            return Ok(());
        }

        match self.options.direction {
            Direction::Pull => remove_local(path),
            Direction::Push => {
                self.remote
                    .remove(&device_path(path))
                    .map_err(|e| SyncError::Removal {
                        path: path.to_string(),
                        message: e.to_string(),
                    })
            }
        }
    }

    fn ensure_parent_dir(&self, dest: &Utf8Path) -> Result<(), SyncError> {
        let Some(parent) = dest.parent() else {
            return Ok(());
        };
        if parent.as_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(parent).map_err(|e| SyncError::DirectoryCreation {
            path: parent.to_string(),
            source: e,
        })
    }
}

/// Remove a local path; directories (from the listing's file/dir ambiguity)
/// are removed recursively.
fn remove_local(path: &Utf8Path) -> Result<(), SyncError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SyncError::Removal {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    result.map_err(|e| SyncError::Removal {
        path: path.to_string(),
        message: e.to_string(),
    })
}
