//! Terminal reporting
//!
//! Per-file action lines in the style users of mirror tools expect, plus a
//! spinner for the enumeration phase (a recursive device listing can take
//! several seconds on large trees). Debug diagnostics are opt-in per run.

use camino::Utf8Path;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

/// Prints per-file actions, diagnostics, and the run summary.
pub struct Reporter {
    debug: bool,
    scan_bar: RefCell<Option<ProgressBar>>,
}

impl Reporter {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            scan_bar: RefCell::new(None),
        }
    }

    /// Start the enumeration spinner for one tree.
    pub fn start_scan(&self, label: &str) {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(120));
        if let Ok(template) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(template);
        }
        bar.set_message(format!("Enumerating {} tree...", label));
        *self.scan_bar.borrow_mut() = Some(bar);
    }

    /// Finish the enumeration spinner with a file count.
    pub fn finish_scan(&self, label: &str, entries: usize) {
        if let Some(bar) = self.scan_bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
        println!("Enumerated {} tree: {} entries", label, entries);
    }

    pub fn copying(&self, source: &Utf8Path, dest: &Utf8Path) {
        println!(
            "Copying: {} -> {}",
            style(source).blue(),
            style(dest).blue()
        );
    }

    pub fn copied(&self, source: &Utf8Path, dest: &Utf8Path) {
        println!(
            "Copied: {} -> {}\n",
            style(source).green(),
            style(dest).green()
        );
    }

    pub fn skipped(&self, source: &Utf8Path, dest: &Utf8Path) {
        println!(
            "Skipped: {} -> {} (file already up to date)\n",
            style(source).dim(),
            style(dest).dim()
        );
    }

    pub fn removing(&self, path: &Utf8Path) {
        println!("Removing: {}", style(path).yellow());
    }

    pub fn copy_failed(&self, source: &Utf8Path, dest: &Utf8Path, message: &str) {
        println!(
            "Failed to copy: {} -> {}\nError: {}\n",
            style(source).red(),
            style(dest).red(),
            style(message.trim()).red()
        );
    }

    pub fn remove_failed(&self, path: &Utf8Path, message: &str) {
        println!(
            "Failed to remove: {}\nError: {}",
            style(path).red(),
            style(message.trim()).red()
        );
    }

    /// Diagnostic: one side of the comparison does not exist.
    pub fn debug_missing(&self, path: &Utf8Path, needs_copy: bool) {
        if !self.debug {
            return;
        }
        println!(
            "{} {}",
            style(format!("{} doesn't exist!", path)).red(),
            style(format!("needs copy: {}", needs_copy)).magenta()
        );
    }

    /// Diagnostic: digest comparison inputs.
    pub fn debug_digests(
        &self,
        source: &Utf8Path,
        dest: &Utf8Path,
        source_digest: &str,
        dest_digest: &str,
    ) {
        if !self.debug {
            return;
        }
        println!(
            "Digest diff: {} -> {}\n  source: {}\n  dest:   {}",
            style(source).cyan(),
            style(dest).cyan(),
            style(display_digest(source_digest)).magenta(),
            style(display_digest(dest_digest)).magenta()
        );
    }

    /// Diagnostic: final verdict for one file pair.
    pub fn debug_decision(&self, reason: &str, needs_copy: bool) {
        if !self.debug {
            return;
        }
        println!(
            "{} {}",
            style(reason).red(),
            style(format!("needs copy: {}", needs_copy)).magenta()
        );
    }

    /// Final run summary.
    pub fn summary(&self, copied: usize, skipped: usize, removed: usize, failed: usize) {
        println!(
            "Done: {} copied, {} skipped, {} removed, {} failed",
            copied, skipped, removed, failed
        );
    }
}

fn display_digest(digest: &str) -> &str {
    if digest.is_empty() {
        "<unavailable>"
    } else {
        digest
    }
}
