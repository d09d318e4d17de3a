//! Error types for droidsync

use thiserror::Error;

/// Error types for droidsync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stat probe found nothing at the given path.
    ///
    /// Never surfaced to the user; the decision engine branches on it.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// An adb invocation failed or produced unusable output
    #[error("adb command failed: {0}")]
    RemoteCommand(String),

    /// Tree enumeration failed; fatal to the whole run
    #[error("failed to enumerate {root}: {message}")]
    Enumeration { root: String, message: String },

    /// A single file transfer failed; the run continues
    #[error("failed to copy {path}: {message}")]
    Transfer { path: String, message: String },

    /// Removal of an orphaned destination path failed; the run continues
    #[error("failed to remove {path}: {message}")]
    Removal { path: String, message: String },

    /// Destination directory could not be created; fatal for pull
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Whether this error aborts the whole run rather than one file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::Enumeration { .. } | SyncError::DirectoryCreation { .. }
        )
    }
}
