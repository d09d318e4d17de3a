//! Remote filesystem access through a device bridge
//!
//! Everything that touches the device goes through the [`RemoteFs`] trait so
//! the decision engine and orchestrator never spawn processes themselves.
//! Production uses [`AdbShell`]; tests substitute in-memory fakes.

mod adb;

pub use adb::AdbShell;

use crate::config::Direction;
use crate::types::SyncError;
use camino::Utf8Path;

/// Capability interface over the device side of a sync.
///
/// The stat/digest/list operations return the raw command output so their
/// parsers can be exercised against fakes as well as the real bridge.
pub trait RemoteFs {
    /// Raw `"<size>,<mtime_epoch_seconds>"` line for one remote path.
    fn stat(&self, path: &str) -> Result<String, SyncError>;

    /// Raw digest command output (`"<hex_digest>  <path>"` style).
    fn digest(&self, path: &str) -> Result<String, SyncError>;

    /// Raw recursive listing output rooted at `root`.
    fn list(&self, root: &str) -> Result<String, SyncError>;

    /// Transfer one file between device and local filesystem.
    fn copy(&self, direction: Direction, source: &str, dest: &str) -> Result<(), SyncError>;

    /// Recursively remove one remote path.
    fn remove(&self, path: &str) -> Result<(), SyncError>;
}

/// Convert a path to the slash form the device expects.
///
/// The only normalization performed; semantic path rewriting is out of scope.
pub fn device_path(path: &Utf8Path) -> String {
    path.as_str().replace('\\', "/")
}
