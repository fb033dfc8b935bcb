//! # Trie Routing
//!
//! The prefix trie has no node objects. It is read back out of the section
//! map's keys on every lookup, which is correct as long as those keys
//! partition the identifier space.

use crate::domain::{Identifier, Prefix, SectionMap, IDENTIFIER_BITS};
use std::ops::Bound;

/// Prefix of the section owning `name`: the shortest leading run of `name`'s
/// bits that is a section key. `None` if no such section exists.
pub fn resolve_prefix(sections: &SectionMap, name: &Identifier) -> Option<Prefix> {
    let mut key = String::with_capacity(IDENTIFIER_BITS);
    for depth in 0..=IDENTIFIER_BITS {
        if sections.contains_key(&key) {
            return Some(Prefix::of(name, depth));
        }
        if depth < IDENTIFIER_BITS {
            key.push(if name.bit(depth) { '1' } else { '0' });
        }
    }
    None
}

/// Sections covering `prefix`: the unique ancestor-or-self section if one
/// exists, otherwise every leaf section beneath it.
pub fn matching_prefixes(sections: &SectionMap, prefix: &Prefix) -> Vec<Prefix> {
    if let Some(ancestor) = prefix
        .ancestry()
        .find(|candidate| sections.contains_key(&candidate.key()))
    {
        return vec![ancestor];
    }
    descendant_prefixes(sections, prefix)
}

/// Every leaf section strictly beneath `prefix`, depth first, left before right.
///
/// An empty result under a prefix that should be covered means the
/// partition is broken; the caller reports it.
pub fn descendant_prefixes(sections: &SectionMap, prefix: &Prefix) -> Vec<Prefix> {
    let mut found = Vec::new();
    collect_descendants(sections, prefix, &mut found);
    found
}

fn collect_descendants(sections: &SectionMap, prefix: &Prefix, found: &mut Vec<Prefix>) {
    if !has_descendant(sections, prefix) {
        return;
    }
    // stops at identifier width
    let (Some(left), Some(right)) = (prefix.extend_left(), prefix.extend_right()) else {
        return;
    };
    for child in [left, right] {
        if sections.contains_key(&child.key()) {
            found.push(child);
        } else {
            collect_descendants(sections, &child, found);
        }
    }
}

/// True if some section key is strictly longer than `prefix` and starts with it.
///
/// Keys sharing a leading string sort contiguously, so one range scan suffices.
pub fn has_descendant(sections: &SectionMap, prefix: &Prefix) -> bool {
    let key = prefix.key();
    sections
        .range::<str, _>((Bound::Included(key.as_str()), Bound::Unbounded))
        .take_while(|(k, _)| k.starts_with(key.as_str()))
        .any(|(k, _)| k.len() > key.len())
}
