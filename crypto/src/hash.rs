//! Blake2b-256 hashing.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(blake2b_256(b"gavel"), blake2b_256(b"gavel"));
    }

    #[test]
    fn different_inputs_differ() {
        assert_ne!(blake2b_256(b"mint"), blake2b_256(b"burn"));
    }

    #[test]
    fn multi_matches_concatenation() {
        let single = blake2b_256(b"permitdelegate");
        let multi = blake2b_256_multi(&[b"permit", b"delegate"]);
        assert_eq!(single, multi);
    }
}
