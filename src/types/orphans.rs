//! OrphanTracker - destination paths with no matching source file

use super::TreeSnapshot;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;

/// Tracks which destination paths are still unaccounted for.
///
/// Seeded from the full destination snapshot at orchestration start. As each
/// source file is matched to its destination path, that path and its whole
/// ancestor chain are struck from the set; a directory that still contains a
/// synced file must never end up in the deletion set. Whatever remains after
/// the source walk is the deletion set.
#[derive(Debug)]
pub struct OrphanTracker {
    pending: HashSet<Utf8PathBuf>,
}

impl OrphanTracker {
    /// Seed the tracker from a destination snapshot.
    pub fn seed(destination: &TreeSnapshot) -> Self {
        Self {
            pending: destination.iter().cloned().collect(),
        }
    }

    /// Record that `dest_path` corresponds to a source file.
    ///
    /// Removes the path itself and every ancestor from the pending set.
    pub fn mark_synced(&mut self, dest_path: &Utf8Path) {
        self.pending.remove(dest_path);
        for ancestor in dest_path.ancestors().skip(1) {
            if ancestor.as_str().is_empty() {
                continue;
            }
            self.pending.remove(ancestor);
        }
    }

    /// Number of still-unmatched destination paths.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Consume the tracker and return the deletion set, sorted for
    /// deterministic output.
    pub fn into_orphans(self) -> Vec<Utf8PathBuf> {
        let mut orphans: Vec<Utf8PathBuf> = self.pending.into_iter().collect();
        orphans.sort();
        orphans
    }
}
