//! # Domain Errors
//!
//! Error types for the Section Membership subsystem.
//!
//! Most of these are anomalies: the network logs them and carries on with a
//! conservative fallback. Only construction and parsing return them to the
//! caller.

use thiserror::Error;

/// Section membership error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    /// The section prefixes no longer partition the identifier space.
    #[error("Partition invariant violated: {0}")]
    PartitionInvariantViolation(String),

    /// A departure named a vault whose recorded section does not hold it.
    #[error("Unknown vault removal: {name} has no section at prefix '{prefix}'")]
    UnknownVaultRemoval {
        /// Prefix key recorded on the vault
        prefix: String,
        /// Hex name of the vault
        name: String,
    },

    /// A relocated vault was rejected by its destination section.
    #[error("Disallowed relocation of {name} into prefix '{prefix}'")]
    DisallowedRelocation {
        /// Destination prefix key
        prefix: String,
        /// Hex name of the vault
        name: String,
    },

    /// A descendant search hit the identifier width without finding sections.
    #[error("No descendant sections exist under prefix '{0}'")]
    MissingDescendants(String),

    /// A section size is outside the split/merge bounds.
    #[error("Section '{prefix}' has {size} vaults, bound is {bound}")]
    SizeBoundViolation {
        /// Prefix key of the section
        prefix: String,
        /// Current member count
        size: usize,
        /// Violated threshold
        bound: usize,
    },

    /// A prefix string could not be parsed.
    #[error("Invalid prefix: {0}")]
    InvalidPrefix(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// The log subscriber could not be installed.
    #[error("Logging initialisation failed: {0}")]
    LoggingInit(String),
}
