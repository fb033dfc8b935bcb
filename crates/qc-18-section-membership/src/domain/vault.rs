//! # Vault
//!
//! A node of the simulated network: a name, the prefix of the section that
//! currently holds it, and an age that grows with every relocation.

use super::identifier::Identifier;
use super::prefix::Prefix;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A network node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    name: Identifier,
    prefix: Prefix,
    age: u32,
}

impl Vault {
    /// A fresh vault: age 0, not yet placed in a section.
    pub fn new(name: Identifier) -> Self {
        Self {
            name,
            prefix: Prefix::blank(),
            age: 0,
        }
    }

    /// A fresh vault with a random name.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(Identifier::generate(rng))
    }

    /// Vault name.
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// Prefix of the owning section.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Number of relocations survived.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Age by one relocation.
    pub fn increment_age(&mut self) {
        self.age = self.age.saturating_add(1);
    }

    /// Rewrite the leading bits of the name to `prefix`, keeping the tail.
    ///
    /// The network assigns the new location; the vault does not choose it.
    pub fn rename_with_prefix(&mut self, prefix: &Prefix) {
        for (i, bit) in prefix.bits().iter().enumerate() {
            self.name.set_bit(i, *bit);
        }
    }

    pub(crate) fn set_prefix(&mut self, prefix: Prefix) {
        self.prefix = prefix;
    }
}
