//! End-to-end sync runs against an in-memory fake device
//!
//! The fake implements the `RemoteFs` trait with a path → file map and
//! produces real `ls -R` style listing text, so these tests exercise the
//! listing parser, the decision engine, orphan tracking, and the executor
//! together without spawning adb.

use camino::{Utf8Path, Utf8PathBuf};
use droidsync::commands::sync::run;
use droidsync::config::{Direction, SyncOptions};
use droidsync::hash::digest_bytes;
use droidsync::remote::RemoteFs;
use droidsync::types::SyncError;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;

#[derive(Clone)]
struct DeviceFile {
    content: Vec<u8>,
    modified: i64,
}

/// In-memory Android device.
struct FakeDevice {
    files: RefCell<HashMap<String, DeviceFile>>,
}

impl FakeDevice {
    fn new() -> Self {
        Self {
            files: RefCell::new(HashMap::new()),
        }
    }

    fn put(&self, path: &str, content: &[u8], modified: i64) {
        self.files.borrow_mut().insert(
            path.to_string(),
            DeviceFile {
                content: content.to_vec(),
                modified,
            },
        );
    }

    fn content(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).map(|f| f.content.clone())
    }

    fn has(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }
}

impl RemoteFs for FakeDevice {
    fn stat(&self, path: &str) -> Result<String, SyncError> {
        match self.files.borrow().get(path) {
            Some(file) => Ok(format!("{},{}\n", file.content.len(), file.modified)),
            None => Err(SyncError::RemoteCommand(format!(
                "stat: '{}': No such file or directory",
                path
            ))),
        }
    }

    fn digest(&self, path: &str) -> Result<String, SyncError> {
        match self.files.borrow().get(path) {
            Some(file) => Ok(format!("{}  {}\n", digest_bytes(&file.content), path)),
            None => Err(SyncError::RemoteCommand(format!(
                "sha256sum: {}: No such file or directory",
                path
            ))),
        }
    }

    fn list(&self, root: &str) -> Result<String, SyncError> {
        let files = self.files.borrow();
        let prefix = format!("{}/", root);

        // Directory → entry names, derived from every stored file path.
        let mut dirs: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for path in files.keys() {
            if !path.starts_with(&prefix) {
                continue;
            }
            let mut child = path.clone();
            loop {
                let (parent, name) = split_parent(&child);
                dirs.entry(parent.clone()).or_default().insert(name);
                if parent == root {
                    break;
                }
                child = parent;
            }
        }

        if dirs.is_empty() {
            return Err(SyncError::RemoteCommand(format!(
                "ls: {}: No such file or directory",
                root
            )));
        }

        let mut output = String::new();
        for (dir, entries) in &dirs {
            output.push_str(dir);
            output.push_str(":\n");
            for entry in entries {
                output.push_str(entry);
                output.push('\n');
            }
            output.push('\n');
        }
        Ok(output)
    }

    fn copy(&self, direction: Direction, source: &str, dest: &str) -> Result<(), SyncError> {
        match direction {
            Direction::Pull => {
                let content = self
                    .content(source)
                    .ok_or_else(|| SyncError::RemoteCommand(format!("pull: {}: gone", source)))?;
                fs::write(dest, content).map_err(SyncError::Io)
            }
            Direction::Push => {
                let content = fs::read(source).map_err(SyncError::Io)?;
                self.put(dest, &content, 1);
                Ok(())
            }
        }
    }

    fn remove(&self, path: &str) -> Result<(), SyncError> {
        let mut files = self.files.borrow_mut();
        let prefix = format!("{}/", path);
        files.retain(|key, _| key != path && !key.starts_with(&prefix));
        Ok(())
    }
}

fn split_parent(path: &str) -> (String, String) {
    match path.rsplit_once('/') {
        Some((parent, name)) => (parent.to_string(), name.to_string()),
        None => (String::new(), path.to_string()),
    }
}

/// Build options with the device path on the remote side of `direction`.
fn options(
    direction: Direction,
    device_root: &str,
    local_root: &Utf8Path,
    checksum: bool,
    dry_run: bool,
) -> SyncOptions {
    let (source, destination) = match direction {
        Direction::Pull => (Utf8PathBuf::from(device_root), local_root.to_path_buf()),
        Direction::Push => (local_root.to_path_buf(), Utf8PathBuf::from(device_root)),
    };
    SyncOptions {
        direction,
        source,
        destination,
        checksum,
        dry_run,
        debug: false,
    }
}

fn utf8_tempdir() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 tempdir");
    (dir, path)
}

// Worked example: a.txt is new, b/c.txt matches, old.txt is an orphan.
#[test]
fn pull_copies_new_skips_identical_and_deletes_orphans() {
    let device = FakeDevice::new();
    device.put("/sdcard/data/a.txt", b"aaaaaaaaaa", 100);
    device.put("/sdcard/data/b/c.txt", b"ccccc", 50);

    let (_guard, local) = utf8_tempdir();
    fs::create_dir(local.join("b").as_std_path()).unwrap();
    fs::write(local.join("b/c.txt").as_std_path(), b"ccccc").unwrap();
    fs::write(local.join("old.txt").as_std_path(), b"zzz").unwrap();

    let opts = options(Direction::Pull, "/sdcard/data", &local, false, false);
    let stats = run(&opts, &device).expect("pull run");

    assert_eq!(
        fs::read(local.join("a.txt").as_std_path()).expect("a.txt pulled"),
        b"aaaaaaaaaa"
    );
    assert_eq!(
        fs::read(local.join("b/c.txt").as_std_path()).unwrap(),
        b"ccccc"
    );
    assert!(!local.join("old.txt").as_std_path().exists());

    // The listing also reports the `b` directory as an entry; it probes as
    // missing on the device file map and is skipped.
    assert_eq!(stats.copied, 1);
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.removed, 1);
    assert_eq!(stats.failed(), 0);
}

#[test]
fn pull_is_idempotent() {
    let device = FakeDevice::new();
    device.put("/sdcard/data/a.txt", b"aaaaaaaaaa", 100);
    device.put("/sdcard/data/b/c.txt", b"ccccc", 50);

    let (_guard, local) = utf8_tempdir();
    let opts = options(Direction::Pull, "/sdcard/data", &local, false, false);

    let first = run(&opts, &device).expect("first run");
    assert_eq!(first.copied, 2);

    let second = run(&opts, &device).expect("second run");
    assert_eq!(second.copied, 0);
    assert_eq!(second.removed, 0);
    assert_eq!(second.failed(), 0);
}

#[test]
fn pull_dry_run_changes_nothing_and_predicts_the_real_run() {
    let device = FakeDevice::new();
    device.put("/sdcard/data/a.txt", b"aaaaaaaaaa", 100);

    let (_guard, local) = utf8_tempdir();
    fs::write(local.join("old.txt").as_std_path(), b"zzz").unwrap();

    let dry = options(Direction::Pull, "/sdcard/data", &local, false, true);
    let predicted = run(&dry, &device).expect("dry run");

    // No mutation of any kind.
    assert!(!local.join("a.txt").as_std_path().exists());
    assert!(local.join("old.txt").as_std_path().exists());
    assert_eq!(predicted.copied, 1);
    assert_eq!(predicted.removed, 1);

    let real = options(Direction::Pull, "/sdcard/data", &local, false, false);
    let actual = run(&real, &device).expect("real run");

    assert_eq!(actual.copied, predicted.copied);
    assert_eq!(actual.removed, predicted.removed);
    assert!(local.join("a.txt").as_std_path().exists());
    assert!(!local.join("old.txt").as_std_path().exists());
}

#[test]
fn pull_size_mismatch_with_older_source_is_not_copied() {
    let device = FakeDevice::new();
    // Bigger on the device, but older than the freshly written local file.
    device.put("/sdcard/data/report.txt", b"device version, longer", 100);

    let (_guard, local) = utf8_tempdir();
    fs::write(local.join("report.txt").as_std_path(), b"local").unwrap();

    let opts = options(Direction::Pull, "/sdcard/data", &local, false, false);
    let stats = run(&opts, &device).expect("pull run");

    assert_eq!(stats.copied, 0);
    assert_eq!(stats.skipped, 1);
    assert_eq!(
        fs::read(local.join("report.txt").as_std_path()).unwrap(),
        b"local"
    );
}

#[test]
fn pull_checksum_mode_overrides_metadata_equality() {
    let device = FakeDevice::new();
    // Same size as the local file, older timestamp, different content.
    device.put("/sdcard/data/notes.txt", b"aaaaa", 100);

    let (_guard, local) = utf8_tempdir();
    fs::write(local.join("notes.txt").as_std_path(), b"bbbbb").unwrap();

    let plain = options(Direction::Pull, "/sdcard/data", &local, false, false);
    let stats = run(&plain, &device).expect("plain run");
    assert_eq!(stats.copied, 0);

    let checked = options(Direction::Pull, "/sdcard/data", &local, true, false);
    let stats = run(&checked, &device).expect("checksum run");
    assert_eq!(stats.copied, 1);
    assert_eq!(
        fs::read(local.join("notes.txt").as_std_path()).unwrap(),
        b"aaaaa"
    );
}

#[test]
fn pull_checksum_match_is_skipped() {
    let device = FakeDevice::new();
    device.put("/sdcard/data/same.txt", b"equal", 4_000_000_000);

    let (_guard, local) = utf8_tempdir();
    fs::write(local.join("same.txt").as_std_path(), b"equal").unwrap();

    let opts = options(Direction::Pull, "/sdcard/data", &local, true, false);
    let stats = run(&opts, &device).expect("checksum run");
    assert_eq!(stats.copied, 0);
    assert_eq!(stats.skipped, 1);
}

#[test]
fn pull_into_missing_destination_creates_it() {
    let device = FakeDevice::new();
    device.put("/sdcard/data/deep/file.txt", b"payload", 100);

    let (_guard, base) = utf8_tempdir();
    let dest = base.join("not-created-yet");

    let opts = options(Direction::Pull, "/sdcard/data", &dest, false, false);
    let stats = run(&opts, &device).expect("pull into fresh dir");

    assert_eq!(stats.copied, 1);
    assert_eq!(
        fs::read(dest.join("deep/file.txt").as_std_path()).unwrap(),
        b"payload"
    );
}

#[test]
fn pull_from_missing_remote_source_is_fatal() {
    let device = FakeDevice::new();
    let (_guard, local) = utf8_tempdir();

    let opts = options(Direction::Pull, "/sdcard/nothing-here", &local, false, false);
    let result = run(&opts, &device);

    assert!(matches!(result, Err(SyncError::Enumeration { .. })));
}

#[test]
fn push_copies_new_files_and_removes_orphans() {
    let device = FakeDevice::new();
    device.put("/sdcard/dest/old.mp3", b"stale", 100);

    let (_guard, local) = utf8_tempdir();
    fs::write(local.join("x.txt").as_std_path(), b"xxx").unwrap();
    fs::create_dir(local.join("sub").as_std_path()).unwrap();
    fs::write(local.join("sub/y.txt").as_std_path(), b"yyy").unwrap();

    let opts = options(Direction::Push, "/sdcard/dest", &local, false, false);
    let stats = run(&opts, &device).expect("push run");

    assert_eq!(stats.copied, 2);
    assert_eq!(stats.removed, 1);
    assert_eq!(device.content("/sdcard/dest/x.txt"), Some(b"xxx".to_vec()));
    assert_eq!(
        device.content("/sdcard/dest/sub/y.txt"),
        Some(b"yyy".to_vec())
    );
    assert!(!device.has("/sdcard/dest/old.mp3"));
}

#[test]
fn push_does_not_delete_directories_that_still_hold_synced_files() {
    let device = FakeDevice::new();
    // The remote listing reports `sub` itself as an entry; matching
    // sub/y.txt must keep the directory out of the deletion set.
    device.put("/sdcard/dest/sub/y.txt", b"yyy", 100);

    let (_guard, local) = utf8_tempdir();
    fs::create_dir(local.join("sub").as_std_path()).unwrap();
    fs::write(local.join("sub/y.txt").as_std_path(), b"yyy").unwrap();

    let opts = options(Direction::Push, "/sdcard/dest", &local, false, false);
    let stats = run(&opts, &device).expect("push run");

    assert_eq!(stats.removed, 0);
    assert!(device.has("/sdcard/dest/sub/y.txt"));
}

#[test]
fn push_to_missing_remote_destination_copies_everything() {
    let device = FakeDevice::new();

    let (_guard, local) = utf8_tempdir();
    fs::write(local.join("fresh.txt").as_std_path(), b"first sync").unwrap();

    let opts = options(Direction::Push, "/sdcard/brand-new", &local, false, false);
    let stats = run(&opts, &device).expect("first push");

    assert_eq!(stats.copied, 1);
    assert_eq!(stats.removed, 0);
    assert_eq!(
        device.content("/sdcard/brand-new/fresh.txt"),
        Some(b"first sync".to_vec())
    );
}

#[test]
fn push_dry_run_leaves_the_device_untouched() {
    let device = FakeDevice::new();
    device.put("/sdcard/dest/old.mp3", b"stale", 100);

    let (_guard, local) = utf8_tempdir();
    fs::write(local.join("new.txt").as_std_path(), b"new").unwrap();

    let opts = options(Direction::Push, "/sdcard/dest", &local, false, true);
    let stats = run(&opts, &device).expect("dry push");

    assert_eq!(stats.copied, 1);
    assert_eq!(stats.removed, 1);
    assert!(device.has("/sdcard/dest/old.mp3"));
    assert!(!device.has("/sdcard/dest/new.txt"));
}

// Mirror property: after a non-dry run every source file has a counterpart
// and nothing else remains at the destination.
#[test]
fn pull_produces_a_mirror_of_the_source_tree() {
    let device = FakeDevice::new();
    device.put("/sdcard/data/one.txt", b"1", 100);
    device.put("/sdcard/data/nested/two.txt", b"22", 100);
    device.put("/sdcard/data/nested/deeper/three.txt", b"333", 100);

    let (_guard, local) = utf8_tempdir();
    fs::write(local.join("extra.txt").as_std_path(), b"leftover").unwrap();

    let opts = options(Direction::Pull, "/sdcard/data", &local, false, false);
    run(&opts, &device).expect("pull run");

    let mut found = Vec::new();
    collect_files(local.as_std_path(), &mut found);
    found.sort();

    assert_eq!(
        found,
        vec![
            local.join("nested/deeper/three.txt").into_string(),
            local.join("nested/two.txt").into_string(),
            local.join("one.txt").into_string(),
        ]
        .into_iter()
        .map(std::path::PathBuf::from)
        .collect::<Vec<_>>()
    );
}

fn collect_files(dir: &std::path::Path, out: &mut Vec<std::path::PathBuf>) {
    for entry in fs::read_dir(dir).expect("read_dir") {
        let entry = entry.expect("dir entry");
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out);
        } else {
            out.push(path);
        }
    }
}
