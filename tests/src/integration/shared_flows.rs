//! # Shared Network Flows
//!
//! Concurrent callers behind one `SharedNetwork` handle.

#[cfg(test)]
mod tests {
    use qc_18_section_membership::{MembershipApi, Network, SharedNetwork};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::thread;

    #[test]
    fn test_concurrent_churn_is_serialised() {
        let shared = SharedNetwork::new(Network::from_seed(31));

        let workers: Vec<_> = (0..8u64)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(worker);
                    for _ in 0..200 {
                        if rng.gen_bool(0.3) {
                            if let Some(vault) = shared.random_vault() {
                                shared.remove_vault(&vault);
                                continue;
                            }
                        }
                        let vault = shared.generate_vault();
                        shared.add_vault(vault);
                    }
                })
            })
            .collect();

        let reader = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    shared.read(|network| assert!(network.check_invariants().is_ok()));
                }
            })
        };

        for worker in workers {
            worker.join().unwrap();
        }
        reader.join().unwrap();

        let stats = shared.stats();
        let relocation_moves = 2 * stats.total_relocations;
        assert_eq!(stats.total_joins + stats.total_departures, 1_600 + relocation_moves);
        assert_eq!(shared.total_vaults(), stats.total_vaults);
        assert!(shared.read(|network| network.check_invariants()).is_ok());
    }

    #[test]
    fn test_api_through_trait_object() {
        let api: Box<dyn MembershipApi> = Box::new(SharedNetwork::new(Network::from_seed(2)));
        for _ in 0..30 {
            let vault = api.generate_vault();
            api.add_vault(vault);
        }

        assert_eq!(api.total_vaults(), 30);
        assert!(api.total_sections() >= 2);
        let section = api.random_section().unwrap();
        let histogram = api.age_histogram();
        assert_eq!(histogram.counts.values().sum::<usize>(), 30);
        if let Some(vault) = section.vaults().first() {
            assert!(api.vault(vault.name()).is_some());
        }
    }
}
