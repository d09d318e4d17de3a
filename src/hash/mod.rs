//! Content digest utilities

use crate::types::SyncError;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compute the lowercase hex SHA-256 digest of a local file.
///
/// The file is streamed in 64KB chunks. The hex form matches the output of
/// the device-side `sha256sum`, which is what digests are compared against.
pub fn digest_file(path: &Path) -> Result<String, SyncError> {
    let mut file = File::open(path).map_err(SyncError::Io)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(SyncError::Io)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(to_hex(&hasher.finalize()))
}

/// Compute the lowercase hex SHA-256 digest of a byte slice.
pub fn digest_bytes(bytes: &[u8]) -> String {
    to_hex(&Sha256::digest(bytes))
}

fn to_hex(digest: &[u8]) -> String {
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}
