//! CLI definition and run configuration

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Sync direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device to local filesystem
    Pull,
    /// Local filesystem to device
    Push,
}

impl Direction {
    /// Whether the source tree lives on the device.
    pub fn source_is_remote(self) -> bool {
        matches!(self, Direction::Pull)
    }

    /// Whether the destination tree lives on the device.
    pub fn dest_is_remote(self) -> bool {
        matches!(self, Direction::Push)
    }

    /// The adb transfer subcommand for this direction.
    pub fn adb_subcommand(self) -> &'static str {
        match self {
            Direction::Pull => "pull",
            Direction::Push => "push",
        }
    }
}

/// Options for one sync run, threaded explicitly through every call.
///
/// There is deliberately no global flag state anywhere in the crate.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub direction: Direction,

    /// Source tree root (remote for pull, local for push)
    pub source: Utf8PathBuf,

    /// Destination tree root (local for pull, remote for push)
    pub destination: Utf8PathBuf,

    /// Compare content digests in addition to size/mtime
    pub checksum: bool,

    /// Report intended actions without mutating anything
    pub dry_run: bool,

    /// Emit per-file decision diagnostics
    pub debug: bool,
}

#[derive(Debug, Parser)]
#[command(
    name = "droidsync",
    version,
    about = "Sync files between an Android device and the local system using adb"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pull files from the device to the local filesystem
    Pull {
        /// Path on the device to sync from
        source_path: Utf8PathBuf,

        /// Local path to sync into
        destination_path: Utf8PathBuf,

        /// Compare files using content checksums
        #[arg(long)]
        checksum: bool,

        /// Perform a trial run without making any changes
        #[arg(long)]
        dry_run: bool,

        /// Print per-file decision diagnostics
        #[arg(long)]
        debug: bool,
    },
    /// Push files from the local filesystem to the device
    Push {
        /// Local path to sync from
        source_path: Utf8PathBuf,

        /// Path on the device to sync into
        destination_path: Utf8PathBuf,

        /// Compare files using content checksums
        #[arg(long)]
        checksum: bool,

        /// Perform a trial run without making any changes
        #[arg(long)]
        dry_run: bool,

        /// Print per-file decision diagnostics
        #[arg(long)]
        debug: bool,
    },
}

impl From<Cli> for SyncOptions {
    fn from(cli: Cli) -> Self {
        match cli.command {
            Commands::Pull {
                source_path,
                destination_path,
                checksum,
                dry_run,
                debug,
            } => SyncOptions {
                direction: Direction::Pull,
                source: source_path,
                destination: destination_path,
                checksum,
                dry_run,
                debug,
            },
            Commands::Push {
                source_path,
                destination_path,
                checksum,
                dry_run,
                debug,
            } => SyncOptions {
                direction: Direction::Push,
                source: source_path,
                destination: destination_path,
                checksum,
                dry_run,
                debug,
            },
        }
    }
}
