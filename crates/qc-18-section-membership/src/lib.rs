//! # qc-18-section-membership
//!
//! Section membership for a simulated peer-to-peer network: vaults are
//! grouped into sections by identifier prefix, sections split and merge as
//! they grow and shrink, and vaults age as they are relocated between
//! neighbouring sections.
//!
//! ## Overview
//!
//! - **Prefix Trie**: section prefixes partition the 256-bit identifier space
//! - **Split**: a section reaching `group_size + split_buffer` members splits by the next name bit
//! - **Merge**: a section below `group_size * quorum` merges with its sibling region
//! - **Relocation**: churn-driven moves to the shortest, then smallest, neighbour section
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 adapters::SharedNetwork                  │
//! │               (Arc<RwLock<Network>>, MembershipApi)      │
//! └─────────────────────────────┬────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼────────────────────────────┐
//! │                    service::Network                      │
//! │   join ─→ Section::add_vault ─→ split │ relocate         │
//! │   depart ─→ Section::remove_vault ─→ merge │ relocate    │
//! └──────┬──────────────────────┬─────────────────────┬──────┘
//!        │                      │                     │
//!   algorithms::routing   algorithms::relocation   ports::outbound
//!   (trie over map keys)  (neighbour choice)       (admission, relocation policy)
//! ```
//!
//! ## Example
//!
//! ```
//! use qc_18_section_membership::{Network, NoRelocation};
//!
//! let mut network = Network::builder()
//!     .seed(7)
//!     .relocation(NoRelocation)
//!     .build()
//!     .unwrap();
//!
//! for _ in 0..11 {
//!     let vault = network.generate_vault();
//!     network.add_vault(vault);
//! }
//!
//! assert_eq!(network.total_vaults(), 11);
//! assert!(network.total_sections() >= 2);
//! assert!(network.check_invariants().is_ok());
//! ```

#![warn(missing_docs)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;
pub mod telemetry;

pub use adapters::SharedNetwork;
pub use domain::{
    ChurnEvent, ChurnKind, Identifier, MembershipError, NetworkConfig, NetworkEvent, Prefix,
    Section, SectionConfig, SectionMap, Vault, GROUP_SIZE, MERGE_THRESHOLD, QUORUM_DENOMINATOR,
    QUORUM_NUMERATOR, SPLIT_BUFFER, SPLIT_THRESHOLD,
};
pub use ports::{
    AdmissionPolicy, AdmitAll, AgeingRelocation, MembershipApi, NoRelocation,
    OneInfantPerSection, RelocationPolicy,
};
pub use service::{AgeHistogram, Network, NetworkBuilder, NetworkStats};
pub use telemetry::init_logging;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
