//! Core data types shared across modules

pub mod error;
pub mod metadata;
pub mod orphans;
pub mod snapshot;

pub use error::SyncError;
pub use metadata::FileMetadata;
pub use orphans::OrphanTracker;
pub use snapshot::TreeSnapshot;
