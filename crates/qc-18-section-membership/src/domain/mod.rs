//! # Domain Module
//!
//! Core domain types for the Section Membership subsystem.

pub mod config;
pub mod errors;
pub mod events;
pub mod identifier;
pub mod invariants;
pub mod prefix;
pub mod section;
pub mod vault;

pub use config::*;
pub use errors::*;
pub use events::*;
pub use identifier::*;
pub use invariants::*;
pub use prefix::*;
pub use section::*;
pub use vault::*;

use std::collections::BTreeMap;

/// Hash type (32-byte keccak256).
pub type Hash = [u8; 32];

/// Sections keyed by [`Prefix::key`]. The keys partition the identifier space.
pub type SectionMap = BTreeMap<String, Section>;
