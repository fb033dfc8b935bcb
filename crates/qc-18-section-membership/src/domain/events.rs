//! # Membership Events
//!
//! Values a section mutation hands back to the network.

use super::identifier::Identifier;
use super::prefix::Prefix;
use super::section::Section;
use serde::{Deserialize, Serialize};

/// Kind of membership change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChurnKind {
    /// A vault entered the section.
    Join,
    /// A vault left the section.
    Departure,
}

impl ChurnKind {
    /// Stable tag used when hashing the event.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Join => 0x01,
            Self::Departure => 0x02,
        }
    }
}

/// A membership change observed by one section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnEvent {
    /// Join or departure.
    pub kind: ChurnKind,
    /// The vault that churned.
    pub name: Identifier,
    /// Section that observed the churn.
    pub prefix: Prefix,
    /// Network-wide churn sequence number.
    pub sequence: u64,
}

impl ChurnEvent {
    /// A join observed by `prefix`.
    pub fn join(name: Identifier, prefix: Prefix, sequence: u64) -> Self {
        Self {
            kind: ChurnKind::Join,
            name,
            prefix,
            sequence,
        }
    }

    /// A departure observed by `prefix`.
    pub fn departure(name: Identifier, prefix: Prefix, sequence: u64) -> Self {
        Self {
            kind: ChurnKind::Departure,
            name,
            prefix,
            sequence,
        }
    }
}

/// Outcome of a section mutation.
///
/// `new_sections` is non-empty only when the section split; they replace it
/// in the network. `vault_to_relocate`, when set, names a current member.
#[derive(Debug, Default)]
pub struct NetworkEvent {
    /// Sections replacing the mutated one, in left-to-right order.
    pub new_sections: Vec<Section>,
    /// Member flagged for relocation.
    pub vault_to_relocate: Option<Identifier>,
}

impl NetworkEvent {
    /// No structural change, nothing to relocate.
    pub fn none() -> Self {
        Self::default()
    }

    /// The section split into `sections`.
    pub fn split(sections: Vec<Section>) -> Self {
        Self {
            new_sections: sections,
            vault_to_relocate: None,
        }
    }

    /// The section is unchanged structurally and flags `name`, if any.
    pub fn relocation(name: Option<Identifier>) -> Self {
        Self {
            new_sections: Vec::new(),
            vault_to_relocate: name,
        }
    }

    /// True when the event carries replacement sections.
    pub fn is_split(&self) -> bool {
        !self.new_sections.is_empty()
    }
}
