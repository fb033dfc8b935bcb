//! # Identifier
//!
//! 256-bit vault names. The numeric view is a `U256`; bit `0` is the most
//! significant bit, so the routing bit sequence and the numeric order are
//! always the same thing.

use primitive_types::U256;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of every identifier in bits.
pub const IDENTIFIER_BITS: usize = 256;

/// Width of every identifier in bytes.
pub const IDENTIFIER_BYTES: usize = IDENTIFIER_BITS / 8;

/// A vault name in the 256-bit identifier space.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier(U256);

impl Identifier {
    /// Create an identifier from its numeric value.
    pub fn new(value: U256) -> Self {
        Self(value)
    }

    /// Create an identifier from 32 big-endian bytes.
    pub fn from_bytes(bytes: [u8; IDENTIFIER_BYTES]) -> Self {
        Self(U256::from_big_endian(&bytes))
    }

    /// Uniformly random identifier; every bit is an independent coin flip.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; IDENTIFIER_BYTES];
        rng.fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Numeric view.
    pub fn value(&self) -> U256 {
        self.0
    }

    /// Big-endian byte view.
    pub fn to_bytes(&self) -> [u8; IDENTIFIER_BYTES] {
        let mut bytes = [0u8; IDENTIFIER_BYTES];
        self.0.to_big_endian(&mut bytes);
        bytes
    }

    /// Read bit `index`, counted from the most significant end.
    ///
    /// # Panics
    ///
    /// Panics if `index >= IDENTIFIER_BITS`.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < IDENTIFIER_BITS, "bit index {index} out of range");
        self.0.bit(IDENTIFIER_BITS - 1 - index)
    }

    /// Overwrite bit `index`, counted from the most significant end.
    ///
    /// # Panics
    ///
    /// Panics if `index >= IDENTIFIER_BITS`.
    pub fn set_bit(&mut self, index: usize, value: bool) {
        assert!(index < IDENTIFIER_BITS, "bit index {index} out of range");
        let mask = U256::one() << (IDENTIFIER_BITS - 1 - index);
        self.0 = if value { self.0 | mask } else { self.0 & !mask };
    }

    /// Iterate bits from most to least significant.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..IDENTIFIER_BITS).map(move |i| self.bit(i))
    }

    /// Zero-padded 256 character binary rendering.
    pub fn binary_string(&self) -> String {
        self.bits().map(|b| if b { '1' } else { '0' }).collect()
    }

    /// Short hex form used in log lines.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.to_bytes()[..4])
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({}..)", self.short_hex())
    }
}

impl From<[u8; IDENTIFIER_BYTES]> for Identifier {
    fn from(bytes: [u8; IDENTIFIER_BYTES]) -> Self {
        Self::from_bytes(bytes)
    }
}
