//! # Section
//!
//! The vaults responsible for one prefix of the identifier space, and the
//! size-driven state machine that splits them.
//!
//! | State    | Size                                    |
//! |----------|-----------------------------------------|
//! | Small    | `< merge_threshold`                     |
//! | Stable   | `merge_threshold ..< split_threshold`   |
//! | Overfull | `>= split_threshold` (never at rest)    |

use super::config::SectionConfig;
use super::events::{ChurnEvent, NetworkEvent};
use super::identifier::{Identifier, IDENTIFIER_BITS};
use super::prefix::Prefix;
use super::vault::Vault;
use crate::ports::{AdmissionPolicy, RelocationPolicy};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Collaborators a section consults while mutating.
pub struct SectionContext<'a> {
    /// Size policy.
    pub config: &'a SectionConfig,
    /// Join admission predicate.
    pub admission: &'a dyn AdmissionPolicy,
    /// Relocation candidate selection.
    pub relocation: &'a dyn RelocationPolicy,
    /// Network-wide churn sequence number for this mutation.
    pub sequence: u64,
}

/// Vaults sharing a prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    prefix: Prefix,
    vaults: Vec<Vault>,
}

impl Section {
    /// A section at `prefix` holding `vaults`. Each vault is stamped with the prefix.
    pub fn new(prefix: Prefix, vaults: Vec<Vault>) -> Self {
        let vaults = vaults
            .into_iter()
            .map(|mut v| {
                v.set_prefix(prefix.clone());
                v
            })
            .collect();
        Self { prefix, vaults }
    }

    /// The root section covering the whole space, empty.
    pub fn root() -> Self {
        Self::new(Prefix::blank(), Vec::new())
    }

    /// Build the sections for `vaults` under `prefix`, splitting by the next
    /// name bit until every section is below `split_threshold`.
    ///
    /// Returns sections in left-to-right order. Children may be empty.
    pub fn build(prefix: Prefix, vaults: Vec<Vault>, split_threshold: usize) -> Vec<Section> {
        if vaults.len() < split_threshold || prefix.len() >= IDENTIFIER_BITS {
            return vec![Self::new(prefix, vaults)];
        }

        let depth = prefix.len();
        let (right, left): (Vec<Vault>, Vec<Vault>) =
            vaults.into_iter().partition(|v| v.name().bit(depth));

        let (Some(left_prefix), Some(right_prefix)) = (prefix.extend_left(), prefix.extend_right())
        else {
            // unreachable: depth < IDENTIFIER_BITS was checked above
            let mut all = left;
            all.extend(right);
            return vec![Self::new(prefix, all)];
        };

        let mut sections = Self::build(left_prefix, left, split_threshold);
        sections.extend(Self::build(right_prefix, right, split_threshold));
        sections
    }

    /// Region owned by this section.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Members in insertion order.
    pub fn vaults(&self) -> &[Vault] {
        &self.vaults
    }

    /// Member count.
    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    /// True when the section has no members.
    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }

    /// True if a member has `name`.
    pub fn contains(&self, name: &Identifier) -> bool {
        self.vaults.iter().any(|v| v.name() == name)
    }

    /// Member with `name`.
    pub fn vault(&self, name: &Identifier) -> Option<&Vault> {
        self.vaults.iter().find(|v| v.name() == name)
    }

    /// Consume the section, returning its members.
    pub fn into_vaults(self) -> Vec<Vault> {
        self.vaults
    }

    /// Admit `vault`. Returns the event and whether the vault was disallowed.
    ///
    /// A vault whose name is already a member is always disallowed. Reaching
    /// the split threshold drains this section into the event's
    /// `new_sections`; the caller must then discard it.
    pub fn add_vault(
        &mut self,
        mut vault: Vault,
        ctx: &SectionContext<'_>,
    ) -> (NetworkEvent, bool) {
        if self.contains(vault.name()) || !ctx.admission.admits(self, &vault) {
            return (NetworkEvent::none(), true);
        }

        let name = *vault.name();
        vault.set_prefix(self.prefix.clone());
        self.vaults.push(vault);

        let split_threshold = ctx.config.split_threshold();
        if self.vaults.len() >= split_threshold {
            let members = std::mem::take(&mut self.vaults);
            let sections = Self::build(self.prefix.clone(), members, split_threshold);
            return (NetworkEvent::split(sections), false);
        }

        let churn = ChurnEvent::join(name, self.prefix.clone(), ctx.sequence);
        (NetworkEvent::relocation(self.relocation_candidate(&churn, ctx)), false)
    }

    /// Remove the member with `name`. Absent names are a no-op.
    ///
    /// Removal never splits, so the event only ever flags a relocation.
    pub fn remove_vault(&mut self, name: &Identifier, ctx: &SectionContext<'_>) -> NetworkEvent {
        let Some(position) = self.vaults.iter().position(|v| v.name() == name) else {
            return NetworkEvent::none();
        };
        self.vaults.remove(position);

        let churn = ChurnEvent::departure(*name, self.prefix.clone(), ctx.sequence);
        NetworkEvent::relocation(self.relocation_candidate(&churn, ctx))
    }

    /// True when the section is below the merge threshold.
    pub fn should_merge(&self, config: &SectionConfig) -> bool {
        self.vaults.len() < config.merge_threshold()
    }

    /// Uniformly chosen member. `None` when empty.
    pub fn random_vault<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Vault> {
        self.vaults.choose(rng)
    }

    fn relocation_candidate(
        &self,
        churn: &ChurnEvent,
        ctx: &SectionContext<'_>,
    ) -> Option<Identifier> {
        ctx.relocation
            .select(self, churn)
            .filter(|candidate| self.contains(candidate))
    }
}
