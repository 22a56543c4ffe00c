//! Core types for payload-embed

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Byte-order marker as it appears in decoded text
pub const BOM_CHAR: char = '\u{FEFF}';

/// UTF-8 encoding of the byte-order marker
pub const BOM_BYTES: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// A text payload read from disk
#[derive(Debug, Clone)]
pub struct Asset {
    pub path: PathBuf,
    /// Decoded text, with the leading BOM already removed when stripping is on
    pub text: String,
    /// Whether the file started with a BOM
    pub had_bom: bool,
}

impl Asset {
    pub fn new(path: PathBuf, text: String, had_bom: bool) -> Self {
        Self { path, text, had_bom }
    }

    /// Length in Unicode scalar values
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Hex SHA-256 of the payload text
    pub fn digest(&self) -> String {
        compute_hash(&self.text)
    }
}

/// A contiguous slice of the payload, emitted as one literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    /// Character offset of the first character in the payload
    pub start: usize,
    pub text: String,
}

impl Chunk {
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Outcome of an embed, check or verify run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedReport {
    pub output_path: PathBuf,
    /// Payload length in characters, after BOM stripping
    pub payload_chars: usize,
    pub payload_bytes: usize,
    pub chunk_count: usize,
    pub digest: String,
    /// False when the output already held the same bytes
    pub changed: bool,
}

pub(crate) fn compute_hash(content: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_constants_agree() {
        let mut buf = [0u8; 4];
        assert_eq!(BOM_CHAR.encode_utf8(&mut buf).as_bytes(), &BOM_BYTES);
    }

    #[test]
    fn test_asset_char_len_counts_scalars() {
        let asset = Asset::new(PathBuf::from("a.js"), "héllo 世界".to_string(), false);
        assert_eq!(asset.char_len(), 8);
        assert!(asset.text.len() > 8);
    }

    #[test]
    fn test_digest_is_stable() {
        let asset = Asset::new(PathBuf::from("a.js"), String::new(), false);
        assert_eq!(
            asset.digest(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
