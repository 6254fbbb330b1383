use sha2::{Digest, Sha256};

/// Stable structural hash of a state, used to key visit counts and manifests.
pub trait CanonicalHash {
    /// Lowercase hex SHA-256 digest of the state's tagged connection sequence.
    fn canonical_hash(&self) -> String;
}

/// Digests a type tag followed by a length-prefixed sequence of words.
pub(crate) fn digest_words(tag: &[u8], words: impl ExactSizeIterator<Item = u64>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(tag);
    hasher.update((words.len() as u64).to_le_bytes());
    for word in words {
        hasher.update(word.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
