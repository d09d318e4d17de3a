//! Sync decision engine - per-file copy/skip decisions

mod compare;
mod engine;

pub use compare::{digests_match, metadata_requires_copy};
pub use engine::DecisionEngine;
