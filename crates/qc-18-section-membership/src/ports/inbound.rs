//! # Inbound Ports
//!
//! The membership API as seen by a driver that shares the network across
//! threads. Every call is atomic with respect to every other call.

use crate::domain::{Identifier, Section, Vault};
use crate::service::{AgeHistogram, NetworkStats};

/// Shared-handle access to a network.
pub trait MembershipApi: Send + Sync {
    /// Join `vault`. Returns `true` if it was disallowed.
    fn add_vault(&self, vault: Vault) -> bool;

    /// Remove `vault` from the section its prefix names.
    fn remove_vault(&self, vault: &Vault);

    /// A fresh vault named from the network's random source.
    fn generate_vault(&self) -> Vault;

    /// Clone of a uniformly chosen vault, if any.
    fn random_vault(&self) -> Option<Vault>;

    /// Clone of the section owning a random name, if any.
    fn random_section(&self) -> Option<Section>;

    /// Clone of the vault named `name`.
    fn vault(&self, name: &Identifier) -> Option<Vault>;

    /// Vault count per age.
    fn age_histogram(&self) -> AgeHistogram;

    /// Counter and size snapshot.
    fn stats(&self) -> NetworkStats;

    /// Vaults currently placed.
    fn total_vaults(&self) -> usize {
        self.stats().total_vaults
    }

    /// Sections currently present.
    fn total_sections(&self) -> usize {
        self.stats().total_sections
    }
}
