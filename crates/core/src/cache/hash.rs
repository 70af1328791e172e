//! Content fingerprints used as cache keys.

use sha2::{Digest, Sha256};

use crate::Error;

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// Content hash and byte length of a blob of image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// Uppercase hex SHA-256 of the bytes.
    pub hash: String,
    pub size: u64,
}

/// Compute the content fingerprint of `bytes`.
///
/// Empty input is valid and yields the SHA-256 of the empty string.
pub fn compute_fingerprint(bytes: &[u8]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    Fingerprint { hash: hex::encode_upper(hasher.finalize()), size: bytes.len() as u64 }
}

/// Check that `hash` looks like an uppercase hex SHA-256 digest.
pub fn validate_hash(hash: &str) -> Result<(), Error> {
    let well_formed =
        hash.len() == HASH_HEX_LEN && hash.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));

    if well_formed { Ok(()) } else { Err(Error::InvalidHash(hash.to_string())) }
}
