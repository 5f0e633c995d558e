//! Content digest (SHA-1 hash)
//!
//! Digests are 40-character lowercase hexadecimal strings and identify both
//! blobs (by content) and commits (by logical content). Stable by
//! construction: the same bytes always hash to the same digest.
//!
//! ## Storage
//!
//! Blobs are stored in `.jot/blobs/<first-2-chars>/<remaining-38-chars>`

use serde::{Deserialize, Serialize};
use sha1::{Digest as _, Sha1};
use std::path::PathBuf;

/// Length of a digest in hexadecimal characters
pub const DIGEST_LENGTH: usize = 40;

/// Length of the abbreviated form used in log output
pub const SHORT_DIGEST_LENGTH: usize = 7;

/// Content-addressed identifier (SHA-1 hash)
///
/// A validated 40-character hexadecimal string. Used as blob identity,
/// commit identity, and as the key of the on-disk blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Hash raw bytes into a digest
    pub fn over(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);

        Digest(hex::encode(hasher.finalize()))
    }

    /// Finish an incrementally-fed hasher into a digest
    pub fn from_hasher(hasher: Sha1) -> Self {
        Digest(hex::encode(hasher.finalize()))
    }

    /// Parse and validate a digest from a string
    ///
    /// # Returns
    ///
    /// Validated digest, or an error on invalid length or non-hex characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != DIGEST_LENGTH {
            anyhow::bail!("Invalid digest length: {}", id.len());
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid digest characters: {}", id);
        }

        Ok(Digest(id))
    }

    /// Convert to the fan-out path used by the blob store
    ///
    /// Splits the hash as `xx/yyyy...` where `xx` is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// Abbreviated form (first 7 characters), as shown in `log` merge lines
    pub fn to_short(&self) -> &str {
        &self.0[..SHORT_DIGEST_LENGTH]
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
