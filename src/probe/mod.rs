//! Metadata and digest probes
//!
//! One probe call is one round trip: remote metadata comes from a single
//! combined stat query so size and mtime never cost two invocations.

use crate::hash;
use crate::remote::{device_path, RemoteFs};
use crate::types::{FileMetadata, SyncError};
use camino::Utf8Path;
use std::time::UNIX_EPOCH;

/// Probes one side of a comparison, local or remote.
pub struct MetadataProbe<'a> {
    remote: &'a dyn RemoteFs,
}

impl<'a> MetadataProbe<'a> {
    pub fn new(remote: &'a dyn RemoteFs) -> Self {
        Self { remote }
    }

    /// Fetch size and mtime for `path`.
    ///
    /// Returns `NotFound` when the path does not exist on the queried side,
    /// or when the remote stat query errors or yields no output at all.
    pub fn metadata(&self, path: &Utf8Path, remote: bool) -> Result<FileMetadata, SyncError> {
        if remote {
            self.remote_metadata(path)
        } else {
            local_metadata(path)
        }
    }

    fn remote_metadata(&self, path: &Utf8Path) -> Result<FileMetadata, SyncError> {
        let raw = self
            .remote
            .stat(&device_path(path))
            .map_err(|_| SyncError::NotFound {
                path: path.to_string(),
            })?;

        parse_stat_line(&raw).ok_or_else(|| SyncError::NotFound {
            path: path.to_string(),
        })
    }

    /// Content digest of `path`, as lowercase hex.
    ///
    /// Returns an empty string on any failure (unreadable file, command
    /// error, empty output). Empty digests never compare equal, so an
    /// unresolvable checksum biases toward re-copying.
    pub fn digest(&self, path: &Utf8Path, remote: bool) -> String {
        if remote {
            self.remote
                .digest(&device_path(path))
                .ok()
                .and_then(|raw| first_token(&raw))
                .unwrap_or_default()
        } else {
            hash::digest_file(path.as_std_path()).unwrap_or_default()
        }
    }
}

/// Parse a `"<size>,<mtime_epoch_seconds>"` stat line.
///
/// An empty line is a hard failure (`None`); non-numeric or missing fields
/// degrade to zero rather than failing the whole probe.
pub(crate) fn parse_stat_line(raw: &str) -> Option<FileMetadata> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }

    let mut fields = line.split(',');
    let size = fields
        .next()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let modified = fields
        .next()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(0);

    Some(FileMetadata::new(size, modified))
}

/// First whitespace-delimited token of a digest command's output.
fn first_token(raw: &str) -> Option<String> {
    raw.split_whitespace().next().map(str::to_string)
}

fn local_metadata(path: &Utf8Path) -> Result<FileMetadata, SyncError> {
    let metadata = std::fs::metadata(path).map_err(|_| SyncError::NotFound {
        path: path.to_string(),
    })?;

    // Second resolution, matching what the device-side stat reports.
    let modified = metadata
        .modified()
        .ok()
        .and_then(|mtime| mtime.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    Ok(FileMetadata::new(metadata.len(), modified))
}
