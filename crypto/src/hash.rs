//! Blake2b hashing for address checksums.

use blake2::{Blake2b512, Digest};

/// Compute a 512-bit Blake2b hash over several byte slices in sequence
/// (avoids concatenation allocation).
pub fn blake2b_512(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    output
}
