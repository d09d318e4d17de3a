//! Tree enumeration, local and remote
//!
//! Each sync run enumerates both roots exactly once, before any file is
//! processed. Local enumeration walks the filesystem; remote enumeration
//! issues a single recursive listing command and parses its text output.

use crate::remote::{device_path, RemoteFs};
use crate::types::{SyncError, TreeSnapshot};
use camino::{Utf8Path, Utf8PathBuf};

/// Recursively enumerate regular files under a local root.
///
/// Directories are excluded from the snapshot. Files whose metadata cannot
/// be read or whose names are not valid UTF-8 are skipped with a warning;
/// an inaccessible root is fatal.
pub fn enumerate_local(root: &Utf8Path) -> Result<TreeSnapshot, SyncError> {
    if !root.as_std_path().is_dir() {
        return Err(SyncError::Enumeration {
            root: root.to_string(),
            message: "not a directory or not accessible".to_string(),
        });
    }

    let mut snapshot = TreeSnapshot::new(root.to_path_buf());
    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(false)
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Warning: skipping unreadable entry under {}: {}", root, e);
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Some(ft) => ft,
            None => continue,
        };
        if file_type.is_dir() {
            continue;
        }

        match Utf8PathBuf::from_path_buf(entry.path().to_path_buf()) {
            Ok(path) => snapshot.insert(path),
            Err(path) => {
                eprintln!(
                    "Warning: skipping non-UTF-8 path {}",
                    path.to_string_lossy()
                );
            }
        }
    }

    Ok(snapshot)
}

/// Enumerate a remote root from one recursive listing round trip.
///
/// The listing format does not mark entry types, so the snapshot may
/// contain directory paths alongside files. Callers must tolerate that;
/// see the orphan tracker's ancestor handling.
pub fn enumerate_remote(root: &Utf8Path, remote: &dyn RemoteFs) -> Result<TreeSnapshot, SyncError> {
    let raw = remote
        .list(&device_path(root))
        .map_err(|e| SyncError::Enumeration {
            root: root.to_string(),
            message: e.to_string(),
        })?;

    let mut snapshot = TreeSnapshot::new(root.to_path_buf());
    for path in parse_recursive_listing(&raw) {
        snapshot.insert(path);
    }
    Ok(snapshot)
}

/// Parse `ls -R` style output into full paths.
///
/// The output is repeated blocks of a `"<directory>:"` header line followed
/// by bare entry names belonging to that directory. Entries are joined with
/// the most recently seen header; blank lines separate blocks. Lines seen
/// before any header are taken as complete paths (a single-file root lists
/// this way).
pub fn parse_recursive_listing(output: &str) -> Vec<Utf8PathBuf> {
    let mut paths = Vec::new();
    let mut current_dir = Utf8PathBuf::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_suffix(':') {
            current_dir = Utf8PathBuf::from(header);
        } else {
            paths.push(current_dir.join(line));
        }
    }

    paths
}
