//! # Prefix
//!
//! Binary paths from the root of the identifier space. A prefix names the
//! subtree of identifiers whose leading bits equal it; the blank prefix
//! names the whole space.

use super::errors::MembershipError;
use super::identifier::{Identifier, IDENTIFIER_BITS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A variable-length (0 to 256 bit) path in the identifier trie.
///
/// Equality is defined on the bit sequence; the string [`Prefix::key`] is a
/// one-to-one rendering of the same bits, so the two always agree.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Prefix {
    bits: Vec<bool>,
}

impl Prefix {
    /// The zero-length root prefix.
    pub fn blank() -> Self {
        Self { bits: Vec::new() }
    }

    /// Build from an explicit bit sequence.
    pub fn from_bits(bits: &[bool]) -> Result<Self, MembershipError> {
        if bits.len() > IDENTIFIER_BITS {
            return Err(MembershipError::InvalidPrefix(format!(
                "{} bits exceeds identifier width",
                bits.len()
            )));
        }
        Ok(Self {
            bits: bits.to_vec(),
        })
    }

    /// The first `len` bits of `name`.
    pub fn of(name: &Identifier, len: usize) -> Self {
        let len = len.min(IDENTIFIER_BITS);
        Self {
            bits: (0..len).map(|i| name.bit(i)).collect(),
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for the root prefix.
    pub fn is_blank(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit sequence, root first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Bit at `index`, if the prefix is that long.
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Canonical string key: one `'0'`/`'1'` per bit, empty for the root.
    pub fn key(&self) -> String {
        self.bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
    }

    /// Append `bit`. `None` once the prefix is a full identifier.
    pub fn extend(&self, bit: bool) -> Option<Self> {
        if self.bits.len() >= IDENTIFIER_BITS {
            return None;
        }
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Some(Self { bits })
    }

    /// Append a `0` bit.
    pub fn extend_left(&self) -> Option<Self> {
        self.extend(false)
    }

    /// Append a `1` bit.
    pub fn extend_right(&self) -> Option<Self> {
        self.extend(true)
    }

    /// Drop the last bit. `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, head) = self.bits.split_last()?;
        Some(Self {
            bits: head.to_vec(),
        })
    }

    /// Same length, last bit flipped. `None` at the root.
    pub fn sibling(&self) -> Option<Self> {
        self.with_flipped_bit(self.bits.len().checked_sub(1)?)
    }

    /// Same length, bit `index` flipped.
    pub fn with_flipped_bit(&self, index: usize) -> Option<Self> {
        let current = self.bit(index)?;
        let mut bits = self.bits.clone();
        bits[index] = !current;
        Some(Self { bits })
    }

    /// True if `name` starts with this prefix.
    pub fn matches(&self, name: &Identifier) -> bool {
        self.bits
            .iter()
            .enumerate()
            .all(|(i, bit)| name.bit(i) == *bit)
    }

    /// True if `other` starts with this prefix (including equality).
    pub fn is_prefix_of(&self, other: &Prefix) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// True if `other` starts with this prefix and is strictly longer.
    pub fn is_ancestor_of(&self, other: &Prefix) -> bool {
        self.bits.len() < other.bits.len() && self.is_prefix_of(other)
    }

    /// Every prefix on the path from the root down to (and including) this one.
    pub fn ancestry(&self) -> impl Iterator<Item = Prefix> + '_ {
        (0..=self.bits.len()).map(move |len| Self {
            bits: self.bits[..len].to_vec(),
        })
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            write!(f, "()")
        } else {
            write!(f, "{}", self.key())
        }
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefix({})", self.key())
    }
}

impl FromStr for Prefix {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(MembershipError::InvalidPrefix(format!(
                    "unexpected character '{}' in '{}'",
                    other, s
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_bits(&bits)
    }
}

impl From<Prefix> for String {
    fn from(prefix: Prefix) -> Self {
        prefix.key()
    }
}

impl TryFrom<String> for Prefix {
    type Error = MembershipError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
