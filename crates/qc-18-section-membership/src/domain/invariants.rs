//! # Domain Invariants
//!
//! Rules that must hold whenever the network is at rest, that is, after
//! every public operation has run to completion.

use super::config::SectionConfig;
use super::errors::MembershipError;
use super::prefix::Prefix;
use super::SectionMap;
use crate::algorithms::routing::has_descendant;

/// Invariant: section prefixes cover the identifier space with no gaps and
/// no overlaps, and every vault sits under its section's prefix.
///
/// An empty map (a network nobody has joined yet) is accepted.
pub fn invariant_partition(sections: &SectionMap) -> Result<(), MembershipError> {
    if sections.is_empty() {
        return Ok(());
    }

    for (key, section) in sections {
        if key != &section.prefix().key() {
            return Err(MembershipError::PartitionInvariantViolation(format!(
                "section '{}' stored under key '{}'",
                section.prefix().key(),
                key
            )));
        }

        // overlap: no strict ancestor may also be a section
        if let Some(ancestor) = section
            .prefix()
            .ancestry()
            .take(section.prefix().len())
            .find(|a| sections.contains_key(&a.key()))
        {
            return Err(MembershipError::PartitionInvariantViolation(format!(
                "section '{}' overlaps ancestor '{}'",
                key,
                ancestor.key()
            )));
        }

        for vault in section.vaults() {
            if !section.prefix().matches(vault.name()) {
                return Err(MembershipError::PartitionInvariantViolation(format!(
                    "vault {} does not match section '{}'",
                    vault.name().short_hex(),
                    key
                )));
            }
            if vault.prefix() != section.prefix() {
                return Err(MembershipError::PartitionInvariantViolation(format!(
                    "vault {} records '{}' but lives in '{}'",
                    vault.name().short_hex(),
                    vault.prefix().key(),
                    key
                )));
            }
        }
    }

    if let Some(gap) = first_gap(sections, &Prefix::blank()) {
        return Err(MembershipError::PartitionInvariantViolation(format!(
            "no section covers prefix '{}'",
            gap.key()
        )));
    }

    Ok(())
}

/// Invariant: every section is strictly below the split threshold.
pub fn invariant_split_bound(
    sections: &SectionMap,
    config: &SectionConfig,
) -> Result<(), MembershipError> {
    let bound = config.split_threshold();
    match sections.values().find(|s| s.len() >= bound) {
        Some(s) => Err(MembershipError::SizeBoundViolation {
            prefix: s.prefix().key(),
            size: s.len(),
            bound,
        }),
        None => Ok(()),
    }
}

/// Invariant: every section holds at least the merge threshold, unless it is
/// the only section.
///
/// Splits do not balance their halves, so a lopsided split can leave a small
/// section until its next departure merges it. Check this only where the
/// identifiers are controlled.
pub fn invariant_merge_bound(
    sections: &SectionMap,
    config: &SectionConfig,
) -> Result<(), MembershipError> {
    if sections.len() <= 1 {
        return Ok(());
    }
    let bound = config.merge_threshold();
    match sections.values().find(|s| s.len() < bound) {
        Some(s) => Err(MembershipError::SizeBoundViolation {
            prefix: s.prefix().key(),
            size: s.len(),
            bound,
        }),
        None => Ok(()),
    }
}

fn first_gap(sections: &SectionMap, prefix: &Prefix) -> Option<Prefix> {
    if sections.contains_key(&prefix.key()) {
        return None;
    }
    if !has_descendant(sections, prefix) {
        return Some(prefix.clone());
    }
    let (left, right) = (prefix.extend_left()?, prefix.extend_right()?);
    first_gap(sections, &left).or_else(|| first_gap(sections, &right))
}
