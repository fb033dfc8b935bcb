//! # Outbound Ports
//!
//! Policy traits the network is constructed with, plus the stock
//! implementations.

use crate::algorithms::churn::{churn_digest, trailing_zero_bits};
use crate::domain::{ChurnEvent, Identifier, Section, Vault};
use std::fmt;

/// Admission predicate consulted before a vault joins a section.
pub trait AdmissionPolicy: fmt::Debug + Send + Sync {
    /// True if `candidate` may join `section` in its current state.
    fn admits(&self, section: &Section, candidate: &Vault) -> bool;
}

/// Relocation trigger consulted after every join or departure that leaves
/// the section structurally unchanged.
pub trait RelocationPolicy: fmt::Debug + Send + Sync {
    /// A current member of `section` to relocate, if any.
    fn select(&self, section: &Section, churn: &ChurnEvent) -> Option<Identifier>;
}

/// Admit every vault.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdmitAll;

impl AdmissionPolicy for AdmitAll {
    fn admits(&self, _section: &Section, _candidate: &Vault) -> bool {
        true
    }
}

/// Reject an age-0 vault while the section already holds one.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneInfantPerSection;

impl AdmissionPolicy for OneInfantPerSection {
    fn admits(&self, section: &Section, candidate: &Vault) -> bool {
        candidate.age() > 0 || section.vaults().iter().all(|v| v.age() > 0)
    }
}

/// Never relocate.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRelocation;

impl RelocationPolicy for NoRelocation {
    fn select(&self, _section: &Section, _churn: &ChurnEvent) -> Option<Identifier> {
        None
    }
}

/// Age-weighted relocation driven by the churn event hash.
///
/// A member of age `a` qualifies when the Keccak-256 digest of the event
/// ends in more than `a` zero bits, so each relocation halves the chance of
/// the next. The oldest qualifying member is chosen; the smallest name
/// breaks ties. The churning vault itself never qualifies.
#[derive(Clone, Copy, Debug, Default)]
pub struct AgeingRelocation;

impl RelocationPolicy for AgeingRelocation {
    fn select(&self, section: &Section, churn: &ChurnEvent) -> Option<Identifier> {
        let zeros = trailing_zero_bits(&churn_digest(churn));

        section
            .vaults()
            .iter()
            .filter(|v| v.name() != &churn.name && zeros > v.age())
            .min_by(|a, b| b.age().cmp(&a.age()).then_with(|| a.name().cmp(b.name())))
            .map(|v| *v.name())
    }
}
