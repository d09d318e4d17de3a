//! # droidsync - adb-backed file synchronization
//!
//! Mirrors a directory tree between an Android device and the local
//! filesystem using `adb` as the transport. Supports both directions
//! (`pull` and `push`), optional checksum comparison, and dry-run mode.

// Module declarations
pub mod config;
pub mod types;
pub mod remote;
pub mod hash;
pub mod probe;
pub mod scanner;
pub mod diff;
pub mod executor;
pub mod ui;
pub mod commands;

// Re-export commonly used types
pub use config::{Direction, SyncOptions};
pub use types::{FileMetadata, OrphanTracker, SyncError, TreeSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
