//! # Algorithms Module
//!
//! Trie routing, relocation destination choice and churn hashing.

pub mod churn;
pub mod relocation;
pub mod routing;

pub use churn::{churn_digest, trailing_zero_bits};
pub use relocation::{neighbour_prefixes, select_destination};
pub use routing::{descendant_prefixes, has_descendant, matching_prefixes, resolve_prefix};
