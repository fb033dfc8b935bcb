//! # Churn Hashing
//!
//! Deterministic pseudo-randomness derived from membership events, used by
//! the ageing relocation policy.

use crate::domain::{ChurnEvent, Hash};
use sha3::{Digest, Keccak256};

/// Keccak-256 over kind, churning name, section prefix and sequence number.
pub fn churn_digest(event: &ChurnEvent) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update([event.kind.tag()]);
    hasher.update(event.name.to_bytes());
    hasher.update((event.prefix.len() as u16).to_be_bytes());
    hasher.update(event.prefix.key().as_bytes());
    hasher.update(event.sequence.to_be_bytes());

    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Count of zero bits at the least significant end of a big-endian digest.
pub fn trailing_zero_bits(digest: &Hash) -> u32 {
    let mut zeros = 0;
    for byte in digest.iter().rev() {
        if *byte == 0 {
            zeros += 8;
            continue;
        }
        zeros += byte.trailing_zeros();
        break;
    }
    zeros
}
