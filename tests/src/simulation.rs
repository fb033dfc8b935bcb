//! # Churn Simulation
//!
//! Seeded driver mixing random joins and departures against one network.

use qc_18_section_membership::{Network, Vault};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What one simulation step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A generated vault joined; `disallowed` mirrors `Network::add_vault`.
    Joined { vault: Vault, disallowed: bool },
    /// A random member departed.
    Departed { vault: Vault },
}

/// Seeded join/departure driver.
#[derive(Debug)]
pub struct ChurnSimulation {
    network: Network,
    rng: StdRng,
    departure_ratio: f64,
}

impl ChurnSimulation {
    /// Drive `network`, choosing departures with probability `departure_ratio`.
    pub fn new(network: Network, seed: u64, departure_ratio: f64) -> Self {
        Self {
            network,
            rng: StdRng::seed_from_u64(seed),
            departure_ratio: departure_ratio.clamp(0.0, 1.0),
        }
    }

    /// Run one join or departure. Departures fall back to joins on an empty network.
    pub fn step(&mut self) -> Step {
        let depart = self.network.total_vaults() > 0 && self.rng.gen_bool(self.departure_ratio);
        if depart {
            if let Some(vault) = self.network.random_vault().cloned() {
                self.network.remove_vault(&vault);
                return Step::Departed { vault };
            }
        }

        let vault = self.network.generate_vault();
        let disallowed = self.network.add_vault(vault.clone());
        Step::Joined { vault, disallowed }
    }

    /// Run `steps` steps, calling `observe` after each.
    pub fn run(&mut self, steps: usize, mut observe: impl FnMut(&Step, &Network)) {
        for _ in 0..steps {
            let step = self.step();
            observe(&step, &self.network);
        }
    }

    /// Network under simulation.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Mutable access for scripted interventions.
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Stop simulating and take the network.
    pub fn into_network(self) -> Network {
        self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_only_simulation() {
        let mut sim = ChurnSimulation::new(Network::from_seed(1), 1, 0.0);
        sim.run(25, |step, _| assert!(matches!(step, Step::Joined { .. })));
        let stats = sim.network().stats();
        assert_eq!(stats.total_joins, 25 + stats.total_relocations);
        assert_eq!(stats.total_departures, stats.total_relocations);
    }

    #[test]
    fn test_departure_on_empty_network_joins() {
        let mut sim = ChurnSimulation::new(Network::from_seed(1), 1, 1.0);
        assert!(matches!(sim.step(), Step::Joined { .. }));
        assert!(matches!(sim.step(), Step::Departed { .. }));
    }
}
