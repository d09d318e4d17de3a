//! TreeSnapshot - a point-in-time listing of one sync root

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;

/// An unordered set of absolute paths under a sync root.
///
/// Enumerated once per run and never refreshed mid-run; all decisions in a
/// sync are made against the same point in time. Remote snapshots may
/// contain directory paths alongside files because the `ls -R` listing
/// format does not mark entry types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSnapshot {
    root: Utf8PathBuf,
    paths: HashSet<Utf8PathBuf>,
}

impl TreeSnapshot {
    /// Create an empty snapshot for the given root.
    pub fn new(root: Utf8PathBuf) -> Self {
        Self {
            root,
            paths: HashSet::new(),
        }
    }

    /// The root this snapshot was enumerated from.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Add an absolute path to the snapshot.
    pub fn insert(&mut self, path: Utf8PathBuf) {
        self.paths.insert(path);
    }

    pub fn contains(&self, path: &Utf8Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterator over all paths, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Utf8PathBuf> {
        self.paths.iter()
    }

    /// Paths sorted lexicographically, for deterministic processing output.
    pub fn sorted_paths(&self) -> Vec<&Utf8PathBuf> {
        let mut paths: Vec<&Utf8PathBuf> = self.paths.iter().collect();
        paths.sort();
        paths
    }
}
