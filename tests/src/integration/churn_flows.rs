//! # Churn Flows
//!
//! Seeded random churn with the default ageing relocation. The partition and
//! split bound must hold after every public operation.

#[cfg(test)]
mod tests {
    use crate::simulation::{ChurnSimulation, Step};
    use qc_18_section_membership::domain::invariant_partition;
    use qc_18_section_membership::{
        Identifier, Network, NetworkConfig, NoRelocation, OneInfantPerSection, SectionMap,
        SPLIT_THRESHOLD,
    };

    fn assert_quiescent(network: &Network) {
        if let Err(e) = network.check_invariants() {
            panic!("invariant broken: {e}");
        }
        assert_eq!(network.stats().anomalies, 0);
    }

    // =========================================================================
    // GROWTH
    // =========================================================================

    #[test]
    fn test_growth_keeps_partition() {
        let mut sim = ChurnSimulation::new(Network::from_seed(21), 21, 0.0);
        sim.run(2_000, |_, network| assert_quiescent(network));

        let network = sim.network();
        assert!(network.total_sections() > 64);
        assert!(network.sections().all(|s| s.len() < SPLIT_THRESHOLD));
        assert!(network.total_splits() >= network.total_sections() as u64 - 1);
    }

    #[test]
    fn test_every_vault_routes_to_its_section() {
        let mut sim = ChurnSimulation::new(Network::from_seed(4), 4, 0.0);
        sim.run(500, |_, _| {});

        let network = sim.network();
        for section in network.sections() {
            for vault in section.vaults() {
                let found = network.vault(vault.name()).unwrap();
                assert_eq!(found.prefix(), section.prefix());
            }
        }
    }

    // =========================================================================
    // MIXED CHURN
    // =========================================================================

    #[test]
    fn test_mixed_churn_keeps_partition() {
        let mut sim = ChurnSimulation::new(Network::from_seed(8), 8, 0.4);
        let mut joined = 0u64;
        let mut departed = 0u64;

        sim.run(3_000, |step, network| {
            match step {
                Step::Joined { .. } => joined += 1,
                Step::Departed { .. } => departed += 1,
            }
            assert_quiescent(network);
        });

        let stats = sim.network().stats();
        assert_eq!(stats.total_joins, joined + stats.total_relocations);
        assert_eq!(stats.total_departures, departed + stats.total_relocations);
        assert!(stats.total_merges > 0);
        assert!(stats.total_relocations > 0);
    }

    #[test]
    fn test_shrink_to_empty() {
        let mut sim = ChurnSimulation::new(Network::from_seed(13), 13, 0.0);
        sim.run(300, |_, _| {});

        let network = sim.network_mut();
        while let Some(leaving) = network.random_vault().cloned() {
            network.remove_vault(&leaving);
            assert_quiescent(network);
        }

        // empty sections outside the last merge may remain
        assert_eq!(network.total_vaults(), 0);
        assert!(network.total_sections() >= 1);
        assert!(network.age_histogram().ages.is_empty());
    }

    #[test]
    fn test_relocation_ages_vaults() {
        let mut sim = ChurnSimulation::new(Network::from_seed(99), 99, 0.3);
        sim.run(2_000, |_, _| {});

        let histogram = sim.network().age_histogram();
        assert_eq!(
            histogram.counts.values().sum::<usize>(),
            sim.network().total_vaults()
        );
        assert!(histogram.ages.iter().any(|age| *age > 0));
        assert!(histogram.ages.windows(2).all(|w| w[0] < w[1]));
    }

    // =========================================================================
    // REPRODUCIBILITY
    // =========================================================================

    #[test]
    fn test_same_seed_same_network() {
        let run = || {
            let mut sim = ChurnSimulation::new(Network::from_seed(77), 77, 0.35);
            sim.run(1_000, |_, _| {});
            sim.into_network()
        };
        let (a, b) = (run(), run());

        assert_eq!(a.stats(), b.stats());
        assert!(a.sections().eq(b.sections()));
    }

    #[test]
    fn test_different_seeds_differ() {
        let names = |seed| {
            let mut network = Network::from_seed(seed);
            (0..5).map(|_| *network.generate_vault().name()).collect::<Vec<Identifier>>()
        };
        assert_ne!(names(1), names(2));
    }

    // =========================================================================
    // POLICIES AND CONFIG
    // =========================================================================

    #[test]
    fn test_without_relocation_ages_stay_zero() {
        let network = Network::builder()
            .seed(5)
            .relocation(NoRelocation)
            .build()
            .unwrap();
        let mut sim = ChurnSimulation::new(network, 5, 0.3);
        sim.run(1_000, |_, network| assert_quiescent(network));

        assert_eq!(sim.network().total_relocations(), 0);
        assert_eq!(sim.network().age_histogram().ages, vec![0]);
    }

    #[test]
    fn test_one_infant_per_section() {
        let network = Network::builder()
            .seed(6)
            .admission(OneInfantPerSection)
            .relocation(NoRelocation)
            .build()
            .unwrap();
        let mut sim = ChurnSimulation::new(network, 6, 0.0);

        let mut rejected = 0;
        sim.run(50, |step, network| {
            if let Step::Joined { disallowed: true, .. } = step {
                rejected += 1;
            }
            assert_quiescent(network);
        });

        // every vault is an infant and never ages, so the first join owns the root
        assert_eq!(sim.network().total_vaults(), 1);
        assert_eq!(rejected, 49);
    }

    #[test]
    fn test_custom_thresholds_from_toml() {
        let config = NetworkConfig::from_toml_str(
            r#"
            seed = 3

            [section]
            group_size = 4
            split_buffer = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.section.split_threshold(), 6);
        assert_eq!(config.section.merge_threshold(), 2);

        let network = Network::builder().config(config).build().unwrap();
        let mut sim = ChurnSimulation::new(network, 3, 0.3);
        sim.run(800, |_, network| {
            assert_quiescent(network);
            assert!(network.sections().all(|s| s.len() < 6));
        });
    }

    #[test]
    fn test_stats_serialise() {
        let mut sim = ChurnSimulation::new(Network::from_seed(2), 2, 0.2);
        sim.run(100, |_, _| {});

        let json = serde_json::to_value(sim.network().stats()).unwrap();
        assert_eq!(json["total_joins"], sim.network().total_joins());
        assert!(json.get("anomalies").is_some());

        let sections: Vec<_> = sim.network().sections().cloned().collect();
        let map: SectionMap = sections
            .into_iter()
            .map(|s| (s.prefix().key(), s))
            .collect();
        assert!(invariant_partition(&map).is_ok());
    }
}
