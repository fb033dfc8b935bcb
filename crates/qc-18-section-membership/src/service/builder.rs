//! Network construction.

use super::network::Network;
use crate::domain::{MembershipError, NetworkConfig};
use crate::ports::{AdmissionPolicy, AdmitAll, AgeingRelocation, RelocationPolicy};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Builder for a [`Network`] with custom configuration and policies.
///
/// Unset policies default to [`AdmitAll`] and [`AgeingRelocation`]. An
/// explicit [`NetworkBuilder::seed`] overrides the config's seed.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    config: NetworkConfig,
    seed: Option<u64>,
    admission: Option<Box<dyn AdmissionPolicy>>,
    relocation: Option<Box<dyn RelocationPolicy>>,
}

impl NetworkBuilder {
    /// Builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration.
    #[must_use]
    pub fn config(mut self, config: NetworkConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the random source.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Admission policy for joins.
    #[must_use]
    pub fn admission(mut self, policy: impl AdmissionPolicy + 'static) -> Self {
        self.admission = Some(Box::new(policy));
        self
    }

    /// Relocation trigger policy.
    #[must_use]
    pub fn relocation(mut self, policy: impl RelocationPolicy + 'static) -> Self {
        self.relocation = Some(Box::new(policy));
        self
    }

    /// Validate the configuration and build an empty network.
    pub fn build(self) -> Result<Network, MembershipError> {
        let mut config = self.config;
        config.validate()?;
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        let rng = match config.seed {
            Some(seed) => Self::seeded_rng(seed),
            None => Self::entropy_rng(),
        };

        Ok(Network::from_parts(
            config,
            rng,
            self.admission.unwrap_or_else(Self::default_admission),
            self.relocation.unwrap_or_else(Self::default_relocation),
        ))
    }

    pub(crate) fn seeded_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    pub(crate) fn entropy_rng() -> StdRng {
        StdRng::from_entropy()
    }

    pub(crate) fn default_admission() -> Box<dyn AdmissionPolicy> {
        Box::new(AdmitAll)
    }

    pub(crate) fn default_relocation() -> Box<dyn RelocationPolicy> {
        Box::new(AgeingRelocation)
    }
}
