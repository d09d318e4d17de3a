//! Pure comparison rules

use crate::types::FileMetadata;

/// Metadata-based copy rule for a pair that exists on both sides.
///
/// A copy is needed iff the sizes differ AND the source is strictly newer.
/// The conjunction is deliberate, if surprising: a size mismatch with an
/// older or equal source timestamp is not copied. Checksum mode layers a
/// digest comparison on top of this rule rather than replacing it.
pub fn metadata_requires_copy(source: &FileMetadata, dest: &FileMetadata) -> bool {
    source.size != dest.size && source.modified > dest.modified
}

/// Whether two content digests count as matching.
///
/// An empty digest (unresolvable checksum) never matches anything, so a
/// failed digest read biases toward re-copying rather than silently
/// skipping a possibly-different file.
pub fn digests_match(source: &str, dest: &str) -> bool {
    !source.is_empty() && source == dest
}
