//! # Configuration
//!
//! Section size policy and network construction settings.
//!
//! # Example
//!
//! ```
//! use qc_18_section_membership::NetworkConfig;
//!
//! let config = NetworkConfig::from_toml_str(
//!     r#"
//!     seed = 42
//!
//!     [section]
//!     group_size = 8
//!     split_buffer = 3
//!     "#,
//! )
//! .expect("valid config");
//!
//! assert_eq!(config.section.split_threshold(), 11);
//! assert_eq!(config.section.merge_threshold(), 4);
//! ```

use super::errors::MembershipError;
use serde::{Deserialize, Serialize};

/// Minimum safe section size.
pub const GROUP_SIZE: usize = 8;

/// Extra members a section holds before it splits.
pub const SPLIT_BUFFER: usize = 3;

/// Quorum fraction numerator.
pub const QUORUM_NUMERATOR: usize = 1;

/// Quorum fraction denominator.
pub const QUORUM_DENOMINATOR: usize = 2;

/// Size at which a section splits.
pub const SPLIT_THRESHOLD: usize = GROUP_SIZE + SPLIT_BUFFER;

/// Size below which a section merges with its sibling.
pub const MERGE_THRESHOLD: usize = GROUP_SIZE * QUORUM_NUMERATOR / QUORUM_DENOMINATOR;

/// Default bound on nested relocations triggered by one public operation.
pub const MAX_RELOCATION_DEPTH: usize = 32;

/// Split/merge size policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Minimum safe section size.
    pub group_size: usize,
    /// Extra members held before splitting.
    pub split_buffer: usize,
    /// Quorum fraction numerator.
    pub quorum_numerator: usize,
    /// Quorum fraction denominator.
    pub quorum_denominator: usize,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            group_size: GROUP_SIZE,
            split_buffer: SPLIT_BUFFER,
            quorum_numerator: QUORUM_NUMERATOR,
            quorum_denominator: QUORUM_DENOMINATOR,
        }
    }
}

impl SectionConfig {
    /// Size at which a section splits. Saturates on overflow, which
    /// [`SectionConfig::validate`] rejects.
    pub fn split_threshold(&self) -> usize {
        self.checked_split_threshold().unwrap_or(usize::MAX)
    }

    /// Size below which a section merges. Saturates on overflow, which
    /// [`SectionConfig::validate`] rejects.
    pub fn merge_threshold(&self) -> usize {
        if self.quorum_denominator == 0 {
            return 0;
        }
        self.checked_merge_threshold().unwrap_or(usize::MAX)
    }

    fn checked_split_threshold(&self) -> Option<usize> {
        self.group_size.checked_add(self.split_buffer)
    }

    fn checked_merge_threshold(&self) -> Option<usize> {
        self.group_size
            .checked_mul(self.quorum_numerator)?
            .checked_div(self.quorum_denominator)
    }

    /// Validate the size policy.
    pub fn validate(&self) -> Result<(), MembershipError> {
        if self.quorum_denominator == 0 {
            return Err(MembershipError::InvalidConfig(
                "quorum_denominator must be non-zero".to_string(),
            ));
        }
        if self.quorum_numerator > self.quorum_denominator {
            return Err(MembershipError::InvalidConfig(format!(
                "quorum {}/{} exceeds one",
                self.quorum_numerator, self.quorum_denominator
            )));
        }
        let split = self.checked_split_threshold().ok_or_else(|| {
            MembershipError::InvalidConfig(format!(
                "split threshold {} + {} overflows",
                self.group_size, self.split_buffer
            ))
        })?;
        let merge = self.checked_merge_threshold().ok_or_else(|| {
            MembershipError::InvalidConfig(format!(
                "merge threshold {} * {} overflows",
                self.group_size, self.quorum_numerator
            ))
        })?;
        if split < 2 {
            return Err(MembershipError::InvalidConfig(format!(
                "split threshold {} is too small to split",
                split
            )));
        }
        if merge >= split {
            return Err(MembershipError::InvalidConfig(format!(
                "merge threshold {} must be below split threshold {}",
                merge, split
            )));
        }
        Ok(())
    }
}

/// Network construction settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Section size policy.
    pub section: SectionConfig,
    /// Random source seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Bound on nested relocations per public operation.
    pub max_relocation_depth: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            section: SectionConfig::default(),
            seed: None,
            max_relocation_depth: MAX_RELOCATION_DEPTH,
        }
    }
}

impl NetworkConfig {
    /// Create config for testing: fixed seed, default thresholds.
    pub fn for_testing() -> Self {
        Self {
            seed: Some(0),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document. Missing fields take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, MembershipError> {
        let config: Self =
            toml::from_str(source).map_err(|e| MembershipError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the full configuration.
    pub fn validate(&self) -> Result<(), MembershipError> {
        self.section.validate()?;
        if self.max_relocation_depth == 0 {
            return Err(MembershipError::InvalidConfig(
                "max_relocation_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
