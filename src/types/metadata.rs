//! FileMetadata - size and modification time of one file

/// Metadata used for copy decisions.
///
/// Produced fresh per comparison and never cached across runs. Modification
/// time is epoch seconds because that is the resolution the device-side
/// `stat -c %Y` query provides; local timestamps are truncated to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,

    /// Last modification time, seconds since the Unix epoch
    pub modified: i64,
}

impl FileMetadata {
    pub fn new(size: u64, modified: i64) -> Self {
        Self { size, modified }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_equality() {
        let a = FileMetadata::new(1024, 1_700_000_000);
        let b = FileMetadata::new(1024, 1_700_000_000);
        let c = FileMetadata::new(1024, 1_700_000_001);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
