//! Seeded binary payloads for file-transfer runs.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// One mebibyte.
pub const MIB: usize = 1_048_576;

/// `len` pseudo-random bytes; the same seed always yields the same bytes.
pub fn random_block(seed: u64, len: usize) -> Vec<u8> {
    let mut block = vec![0u8; len];
    StdRng::seed_from_u64(seed).fill_bytes(&mut block);
    block
}
