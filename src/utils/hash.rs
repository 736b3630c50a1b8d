//! Content hashing for freshness detection.

/// Hash content into a `u64` fingerprint (first 8 bytes of blake3).
#[inline]
pub fn compute(content: &[u8]) -> u64 {
    let digest = blake3::hash(content);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}
