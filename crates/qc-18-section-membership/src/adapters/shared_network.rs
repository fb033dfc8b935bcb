//! # Shared Network
//!
//! A cloneable, thread-safe handle to one [`Network`].
//!
//! Mutations hold the write lock for the whole cascade, so a reader never
//! observes a section map mid-split or mid-merge. Random queries also take
//! the write lock because they advance the random source.

use crate::domain::{Identifier, Section, Vault};
use crate::ports::MembershipApi;
use crate::service::{AgeHistogram, Network, NetworkStats};
use parking_lot::RwLock;
use std::sync::Arc;

/// Lock-serialised handle to a network.
#[derive(Clone, Debug)]
pub struct SharedNetwork {
    inner: Arc<RwLock<Network>>,
}

impl SharedNetwork {
    /// Take ownership of `network`.
    pub fn new(network: Network) -> Self {
        Self {
            inner: Arc::new(RwLock::new(network)),
        }
    }

    /// Run `f` with shared read access.
    pub fn read<T>(&self, f: impl FnOnce(&Network) -> T) -> T {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access.
    pub fn write<T>(&self, f: impl FnOnce(&mut Network) -> T) -> T {
        f(&mut self.inner.write())
    }
}

impl From<Network> for SharedNetwork {
    fn from(network: Network) -> Self {
        Self::new(network)
    }
}

impl MembershipApi for SharedNetwork {
    fn add_vault(&self, vault: Vault) -> bool {
        self.inner.write().add_vault(vault)
    }

    fn remove_vault(&self, vault: &Vault) {
        self.inner.write().remove_vault(vault);
    }

    fn generate_vault(&self) -> Vault {
        self.inner.write().generate_vault()
    }

    fn random_vault(&self) -> Option<Vault> {
        self.inner.write().random_vault().cloned()
    }

    fn random_section(&self) -> Option<Section> {
        self.inner.write().random_section().cloned()
    }

    fn vault(&self, name: &Identifier) -> Option<Vault> {
        self.inner.read().vault(name).cloned()
    }

    fn age_histogram(&self) -> AgeHistogram {
        self.inner.read().age_histogram()
    }

    fn stats(&self) -> NetworkStats {
        self.inner.read().stats()
    }

    fn total_vaults(&self) -> usize {
        self.inner.read().total_vaults()
    }

    fn total_sections(&self) -> usize {
        self.inner.read().total_sections()
    }
}
