//! Sync orchestration for both directions
//!
//! One run: enumerate both trees, walk the source tree deciding per-file
//! copy/skip, track which destination paths were matched, then delete
//! whatever the destination still holds that the source does not.

use crate::config::SyncOptions;
use crate::diff::DecisionEngine;
use crate::executor::TransferExecutor;
use crate::remote::RemoteFs;
use crate::scanner::{enumerate_local, enumerate_remote};
use crate::types::{OrphanTracker, SyncError, TreeSnapshot};
use crate::ui::Reporter;
use camino::Utf8Path;

/// Outcome counters for one sync run.
///
/// Per-file failures are counted, not escalated; only enumeration and
/// directory-creation failures abort a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub copied: usize,
    pub skipped: usize,
    pub removed: usize,
    pub copy_failures: usize,
    pub remove_failures: usize,
}

impl RunStats {
    pub fn failed(&self) -> usize {
        self.copy_failures + self.remove_failures
    }
}

/// Run one sync in the configured direction.
pub fn run(options: &SyncOptions, remote: &dyn RemoteFs) -> Result<RunStats, SyncError> {
    let reporter = Reporter::new(options.debug);
    let direction = options.direction;

    reporter.start_scan("source");
    let source_tree = enumerate_tree(&options.source, direction.source_is_remote(), remote)?;
    reporter.finish_scan("source", source_tree.len());

    reporter.start_scan("destination");
    let dest_tree =
        enumerate_destination(&options.destination, direction.dest_is_remote(), remote)?;
    reporter.finish_scan("destination", dest_tree.len());

    let engine = DecisionEngine::new(remote, options, &reporter);
    let executor = TransferExecutor::new(remote, options);
    let mut tracker = OrphanTracker::seed(&dest_tree);
    let mut stats = RunStats::default();

    for source_path in source_tree.sorted_paths() {
        let relative = match source_path.strip_prefix(&options.source) {
            Ok(relative) => relative,
            Err(_) => {
                // Listing quirks can yield paths outside the root; nothing
                // sensible to mirror them to.
                eprintln!(
                    "Warning: {} is outside the source root, skipping",
                    source_path
                );
                continue;
            }
        };
        let dest_path = options.destination.join(relative);

        if engine.needs_copy(source_path, &dest_path) {
            reporter.copying(source_path, &dest_path);
            match executor.copy(source_path, &dest_path) {
                Ok(()) => {
                    if !options.dry_run {
                        reporter.copied(source_path, &dest_path);
                    }
                    stats.copied += 1;
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    reporter.copy_failed(source_path, &dest_path, &err.to_string());
                    stats.copy_failures += 1;
                }
            }
        } else {
            reporter.skipped(source_path, &dest_path);
            stats.skipped += 1;
        }

        tracker.mark_synced(&dest_path);
    }

    for orphan in tracker.into_orphans() {
        reporter.removing(&orphan);
        match executor.remove(&orphan) {
            Ok(()) => stats.removed += 1,
            Err(err) => {
                reporter.remove_failed(&orphan, &err.to_string());
                stats.remove_failures += 1;
            }
        }
    }

    reporter.summary(stats.copied, stats.skipped, stats.removed, stats.failed());
    Ok(stats)
}

fn enumerate_tree(
    root: &Utf8Path,
    remote_side: bool,
    remote: &dyn RemoteFs,
) -> Result<TreeSnapshot, SyncError> {
    if remote_side {
        enumerate_remote(root, remote)
    } else {
        enumerate_local(root)
    }
}

/// Enumerate the destination, treating a root that does not exist yet as an
/// empty snapshot (the first-run case) rather than a fatal error.
fn enumerate_destination(
    root: &Utf8Path,
    remote_side: bool,
    remote: &dyn RemoteFs,
) -> Result<TreeSnapshot, SyncError> {
    if !remote_side {
        if !root.as_std_path().exists() {
            return Ok(TreeSnapshot::new(root.to_path_buf()));
        }
        return enumerate_local(root);
    }

    match enumerate_remote(root, remote) {
        Ok(snapshot) => Ok(snapshot),
        Err(SyncError::Enumeration { message, .. })
            if message.contains("No such file or directory") =>
        {
            Ok(TreeSnapshot::new(root.to_path_buf()))
        }
        Err(err) => Err(err),
    }
}
