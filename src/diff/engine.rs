//! Per-file decision engine

use super::{digests_match, metadata_requires_copy};
use crate::config::SyncOptions;
use crate::probe::MetadataProbe;
use crate::remote::RemoteFs;
use crate::ui::Reporter;
use camino::Utf8Path;

/// Decides per file pair whether a copy is needed.
///
/// The direction determines which side is probed remotely; once metadata is
/// gathered the decision itself is direction-oblivious.
pub struct DecisionEngine<'a> {
    probe: MetadataProbe<'a>,
    options: &'a SyncOptions,
    reporter: &'a Reporter,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(remote: &'a dyn RemoteFs, options: &'a SyncOptions, reporter: &'a Reporter) -> Self {
        Self {
            probe: MetadataProbe::new(remote),
            options,
            reporter,
        }
    }

    /// Whether `source` should be copied over `dest`.
    ///
    /// - source missing: false (nothing to copy; degraded outcome, not an
    ///   error to the caller)
    /// - dest missing: true (new file)
    /// - both present: sizes differ AND source strictly newer, with checksum
    ///   mode adding "or digests differ"
    pub fn needs_copy(&self, source: &Utf8Path, dest: &Utf8Path) -> bool {
        let direction = self.options.direction;

        let source_meta = match self.probe.metadata(source, direction.source_is_remote()) {
            Ok(meta) => meta,
            Err(_) => {
                self.reporter.debug_missing(source, false);
                return false;
            }
        };

        let dest_meta = match self.probe.metadata(dest, direction.dest_is_remote()) {
            Ok(meta) => meta,
            Err(_) => {
                self.reporter.debug_missing(dest, true);
                return true;
            }
        };

        let metadata_mismatch = metadata_requires_copy(&source_meta, &dest_meta);

        if self.options.checksum {
            let source_digest = self.probe.digest(source, direction.source_is_remote());
            let dest_digest = self.probe.digest(dest, direction.dest_is_remote());
            self.reporter
                .debug_digests(source, dest, &source_digest, &dest_digest);

            if metadata_mismatch || !digests_match(&source_digest, &dest_digest) {
                self.reporter
                    .debug_decision("size/mtime or digest mismatch!", true);
                return true;
            }
        } else if metadata_mismatch {
            self.reporter.debug_decision("size and mtime mismatch!", true);
            return true;
        }

        false
    }
}
