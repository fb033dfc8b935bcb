//! # Relocation Destination
//!
//! Chooses where a flagged vault moves: the neighbouring section with the
//! shortest prefix, then the fewest members, then the smallest key.

use super::routing::matching_prefixes;
use crate::domain::{Prefix, SectionMap};

/// One prefix per bit of `prefix`, each with exactly that bit flipped.
pub fn neighbour_prefixes(prefix: &Prefix) -> Vec<Prefix> {
    (0..prefix.len())
        .filter_map(|i| prefix.with_flipped_bit(i))
        .collect()
}

/// Destination prefix for a vault leaving the section at `current`.
///
/// Candidates are the sections matching each neighbour prefix. Ordering is
/// `(prefix length, member count, key)`; the key comparison settles sections
/// that tie on both length and size. Falls back to `current` when there are
/// no candidates, which is always the case for the root.
pub fn select_destination(sections: &SectionMap, current: &Prefix) -> Prefix {
    neighbour_prefixes(current)
        .iter()
        .flat_map(|neighbour| matching_prefixes(sections, neighbour))
        .filter_map(|candidate| {
            let key = candidate.key();
            let size = sections.get(&key)?.len();
            Some((candidate.len(), size, key, candidate))
        })
        .min_by(|a, b| (a.0, a.1, &a.2).cmp(&(b.0, b.1, &b.2)))
        .map(|(_, _, _, prefix)| prefix)
        .unwrap_or_else(|| current.clone())
}
