//! # Network Service
//!
//! The registry of sections and the orchestration of joins, departures,
//! splits, merges and relocations.
//!
//! Every public mutation runs to completion, cascades included, before it
//! returns. The section map may be transiently inconsistent inside a call
//! but never between calls.

use crate::algorithms::{descendant_prefixes, resolve_prefix, select_destination};
use crate::domain::{
    invariant_partition, invariant_split_bound, Identifier, MembershipError, NetworkConfig,
    NetworkEvent, Prefix, Section, SectionContext, SectionMap, Vault,
};
use crate::ports::{AdmissionPolicy, RelocationPolicy};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

use super::builder::NetworkBuilder;

/// Running counters plus current totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    /// Joins attempted, relocation re-insertions included.
    pub total_joins: u64,
    /// Departures requested, relocation removals included.
    pub total_departures: u64,
    /// Binary splits performed.
    pub total_splits: u64,
    /// Merges performed.
    pub total_merges: u64,
    /// Relocations performed.
    pub total_relocations: u64,
    /// Anomalies logged.
    pub anomalies: u64,
    /// Vaults currently placed.
    pub total_vaults: usize,
    /// Sections currently present.
    pub total_sections: usize,
}

/// Vault count per age.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AgeHistogram {
    /// Age to number of vaults with that age.
    pub counts: BTreeMap<u32, usize>,
    /// Distinct ages, ascending.
    pub ages: Vec<u32>,
}

#[derive(Clone, Copy, Debug, Default)]
struct Counters {
    joins: u64,
    departures: u64,
    splits: u64,
    merges: u64,
    relocations: u64,
    anomalies: u64,
}

/// The simulated network.
#[derive(Debug)]
pub struct Network {
    sections: SectionMap,
    config: NetworkConfig,
    rng: StdRng,
    admission: Box<dyn AdmissionPolicy>,
    relocation: Box<dyn RelocationPolicy>,
    counters: Counters,
    churn_sequence: u64,
    relocation_depth: usize,
}

impl Network {
    /// Empty network with default policies, seeded from entropy.
    pub fn new() -> Self {
        Self::from_parts(
            NetworkConfig::default(),
            NetworkBuilder::entropy_rng(),
            NetworkBuilder::default_admission(),
            NetworkBuilder::default_relocation(),
        )
    }

    /// Empty network with default policies and a reproducible random source.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_parts(
            NetworkConfig {
                seed: Some(seed),
                ..NetworkConfig::default()
            },
            NetworkBuilder::seeded_rng(seed),
            NetworkBuilder::default_admission(),
            NetworkBuilder::default_relocation(),
        )
    }

    /// Start configuring a network.
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::new()
    }

    pub(crate) fn from_parts(
        config: NetworkConfig,
        rng: StdRng,
        admission: Box<dyn AdmissionPolicy>,
        relocation: Box<dyn RelocationPolicy>,
    ) -> Self {
        Self {
            sections: SectionMap::new(),
            config,
            rng,
            admission,
            relocation,
            counters: Counters::default(),
            churn_sequence: 0,
            relocation_depth: 0,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// A fresh age-0 vault named from the network's random source.
    pub fn generate_vault(&mut self) -> Vault {
        Vault::generate(&mut self.rng)
    }

    /// Join `vault`, cascading any split and relocation.
    ///
    /// Returns `true` if the vault was disallowed and is not in the network.
    pub fn add_vault(&mut self, vault: Vault) -> bool {
        self.counters.joins += 1;
        self.join(vault)
    }

    /// Remove `vault` from the section its prefix names, cascading any merge
    /// and relocation. Unknown vaults are logged and ignored.
    pub fn remove_vault(&mut self, vault: &Vault) {
        self.counters.departures += 1;
        self.depart(vault.prefix(), vault.name());
    }

    fn join(&mut self, vault: Vault) -> bool {
        if self.sections.is_empty() {
            self.sections.insert(Prefix::blank().key(), Section::root());
        }

        let prefix = self.owning_prefix(vault.name());
        let key = prefix.key();
        if !self.sections.contains_key(&key) {
            self.report(MembershipError::PartitionInvariantViolation(format!(
                "no section at '{}' for joining vault {}",
                key,
                vault.name().short_hex()
            )));
            return true;
        }

        let sequence = self.next_sequence();
        let ctx = SectionContext {
            config: &self.config.section,
            admission: self.admission.as_ref(),
            relocation: self.relocation.as_ref(),
            sequence,
        };
        let Some(section) = self.sections.get_mut(&key) else {
            return true;
        };
        let name = *vault.name();
        let (event, disallowed) = section.add_vault(vault, &ctx);

        if disallowed {
            debug!("[qc-18] Vault {} disallowed by section '{}'", name.short_hex(), key);
            return true;
        }

        match event {
            NetworkEvent {
                new_sections,
                vault_to_relocate: None,
            } if !new_sections.is_empty() => {
                self.sections.remove(&key);
                debug!(
                    "[qc-18] Section '{}' split into {} sections",
                    key,
                    new_sections.len()
                );
                self.install(new_sections);
            }
            NetworkEvent {
                vault_to_relocate: Some(flagged),
                ..
            } => self.relocate(prefix, flagged),
            _ => {}
        }

        false
    }

    fn depart(&mut self, prefix: &Prefix, name: &Identifier) {
        let key = prefix.key();
        if !self.sections.get(&key).is_some_and(|s| s.contains(name)) {
            self.report(MembershipError::UnknownVaultRemoval {
                prefix: key,
                name: name.short_hex(),
            });
            return;
        }

        let sequence = self.next_sequence();
        let ctx = SectionContext {
            config: &self.config.section,
            admission: self.admission.as_ref(),
            relocation: self.relocation.as_ref(),
            sequence,
        };
        let Some(section) = self.sections.get_mut(&key) else {
            return;
        };
        let event = section.remove_vault(name, &ctx);
        let should_merge = section.should_merge(&self.config.section);

        if should_merge && self.has_more_than_one_section() {
            self.merge(prefix);
        } else if let Some(flagged) = event.vault_to_relocate {
            self.relocate(prefix.clone(), flagged);
        }
    }

    /// Fold the section at `prefix` together with its sibling, or with every
    /// section under the sibling if that region split further, into a single
    /// section at the parent prefix. The result re-splits if overfull.
    fn merge(&mut self, prefix: &Prefix) {
        let (Some(parent), Some(sibling)) = (prefix.parent(), prefix.sibling()) else {
            self.report(MembershipError::PartitionInvariantViolation(
                "root section cannot merge".to_string(),
            ));
            return;
        };
        self.counters.merges += 1;

        let mut members = self
            .sections
            .remove(&prefix.key())
            .map(Section::into_vaults)
            .unwrap_or_default();

        let absorbed = if self.sections.contains_key(&sibling.key()) {
            vec![sibling]
        } else {
            let descendants = descendant_prefixes(&self.sections, &sibling);
            if descendants.is_empty() {
                self.report(MembershipError::MissingDescendants(sibling.key()));
            }
            descendants
        };

        for absorbed_prefix in &absorbed {
            if let Some(section) = self.sections.remove(&absorbed_prefix.key()) {
                members.extend(section.into_vaults());
            }
        }

        debug!(
            "[qc-18] Merged '{}' with {} section(s) into '{}' ({} vaults)",
            prefix.key(),
            absorbed.len(),
            parent.key(),
            members.len()
        );

        let sections = Section::build(parent, members, self.config.section.split_threshold());
        self.install(sections);
    }

    /// Move the member `name` of the section at `from` to the best
    /// neighbouring section, renaming and ageing it on the way.
    fn relocate(&mut self, from: Prefix, name: Identifier) {
        if self.relocation_depth >= self.config.max_relocation_depth {
            debug!(
                "[qc-18] Relocation of {} skipped at cascade depth {}",
                name.short_hex(),
                self.relocation_depth
            );
            return;
        }

        let Some(vault) = self
            .sections
            .get(&from.key())
            .and_then(|s| s.vault(&name))
            .cloned()
        else {
            self.report(MembershipError::PartitionInvariantViolation(format!(
                "relocation target {} is not in section '{}'",
                name.short_hex(),
                from.key()
            )));
            return;
        };

        self.counters.relocations += 1;
        let destination = select_destination(&self.sections, &from);
        debug!(
            "[qc-18] Relocating {} (age {}) from '{}' to '{}'",
            name.short_hex(),
            vault.age(),
            from.key(),
            destination.key()
        );

        self.relocation_depth += 1;
        self.counters.departures += 1;
        self.depart(&from, &name);

        let mut vault = vault;
        vault.rename_with_prefix(&destination);
        vault.increment_age();
        let renamed = *vault.name();

        self.counters.joins += 1;
        if self.join(vault) {
            self.report(MembershipError::DisallowedRelocation {
                prefix: destination.key(),
                name: renamed.short_hex(),
            });
        }
        self.relocation_depth -= 1;
    }

    fn install(&mut self, sections: Vec<Section>) {
        self.counters.splits += sections.len().saturating_sub(1) as u64;
        for section in sections {
            self.sections.insert(section.prefix().key(), section);
        }
    }

    fn owning_prefix(&mut self, name: &Identifier) -> Prefix {
        if let Some(prefix) = resolve_prefix(&self.sections, name) {
            trace!("[qc-18] {} routes to '{}'", name.short_hex(), prefix.key());
            return prefix;
        }
        if self.has_more_than_one_vault() {
            self.report(MembershipError::PartitionInvariantViolation(format!(
                "no prefix for name {}",
                name.short_hex()
            )));
        }
        Prefix::blank()
    }

    fn next_sequence(&mut self) -> u64 {
        self.churn_sequence += 1;
        self.churn_sequence
    }

    fn report(&mut self, anomaly: MembershipError) {
        self.counters.anomalies += 1;
        warn!("[qc-18] {}", anomaly);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Section owning a freshly generated random name.
    pub fn random_section(&mut self) -> Option<&Section> {
        let name = Identifier::generate(&mut self.rng);
        let prefix = resolve_prefix(&self.sections, &name)?;
        self.sections.get(&prefix.key())
    }

    /// Uniform member of [`Network::random_section`]. If that section is
    /// empty, a uniform pick over every vault instead.
    pub fn random_vault(&mut self) -> Option<&Vault> {
        let name = Identifier::generate(&mut self.rng);
        let prefix = resolve_prefix(&self.sections, &name)?;
        let section = self.sections.get(&prefix.key())?;
        if !section.is_empty() {
            return section.random_vault(&mut self.rng);
        }
        self.sections
            .values()
            .flat_map(|s| s.vaults())
            .choose(&mut self.rng)
    }

    /// Sections in key order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// Section with exactly `prefix`.
    pub fn section(&self, prefix: &Prefix) -> Option<&Section> {
        self.sections.get(&prefix.key())
    }

    /// Vault named `name`, found by routing.
    pub fn vault(&self, name: &Identifier) -> Option<&Vault> {
        let prefix = resolve_prefix(&self.sections, name)?;
        self.sections.get(&prefix.key())?.vault(name)
    }

    /// Vault count per age.
    pub fn age_histogram(&self) -> AgeHistogram {
        let mut counts = BTreeMap::new();
        for vault in self.sections.values().flat_map(|s| s.vaults()) {
            *counts.entry(vault.age()).or_insert(0) += 1;
        }
        let ages = counts.keys().copied().collect();
        AgeHistogram { counts, ages }
    }

    /// Vaults currently placed.
    pub fn total_vaults(&self) -> usize {
        self.sections.values().map(Section::len).sum()
    }

    /// Sections currently present.
    pub fn total_sections(&self) -> usize {
        self.sections.len()
    }

    /// True with two or more sections.
    pub fn has_more_than_one_section(&self) -> bool {
        self.sections.len() > 1
    }

    /// True with exactly one section.
    pub fn has_one_section(&self) -> bool {
        self.sections.len() == 1
    }

    /// True with two or more vaults, stopping at the second.
    pub fn has_more_than_one_vault(&self) -> bool {
        self.sections
            .values()
            .flat_map(|s| s.vaults())
            .nth(1)
            .is_some()
    }

    /// Joins attempted, relocation re-insertions included.
    pub fn total_joins(&self) -> u64 {
        self.counters.joins
    }

    /// Departures requested, relocation removals included.
    pub fn total_departures(&self) -> u64 {
        self.counters.departures
    }

    /// Binary splits performed.
    pub fn total_splits(&self) -> u64 {
        self.counters.splits
    }

    /// Merges performed.
    pub fn total_merges(&self) -> u64 {
        self.counters.merges
    }

    /// Relocations performed.
    pub fn total_relocations(&self) -> u64 {
        self.counters.relocations
    }

    /// Counter and size snapshot.
    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            total_joins: self.counters.joins,
            total_departures: self.counters.departures,
            total_splits: self.counters.splits,
            total_merges: self.counters.merges,
            total_relocations: self.counters.relocations,
            anomalies: self.counters.anomalies,
            total_vaults: self.total_vaults(),
            total_sections: self.total_sections(),
        }
    }

    /// Check the partition and split-bound invariants.
    pub fn check_invariants(&self) -> Result<(), MembershipError> {
        invariant_partition(&self.sections)?;
        invariant_split_bound(&self.sections, &self.config.section)
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}
