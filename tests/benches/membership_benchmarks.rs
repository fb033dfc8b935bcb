//! # Section Membership Benchmarks
//!
//! | Operation | Network size |
//! |-----------|--------------|
//! | Join (with split/relocation cascades) | 1k, 10k vaults |
//! | Mixed join/departure churn | 1k, 10k vaults |
//! | Prefix routing | 10k vaults |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_18_section_membership::algorithms::resolve_prefix;
use qc_18_section_membership::{Identifier, Network, SectionMap};
use qc_tests::simulation::ChurnSimulation;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn grown_network(size: usize) -> Network {
    let mut sim = ChurnSimulation::new(Network::from_seed(size as u64), size as u64, 0.0);
    sim.run(size, |_, _| {});
    sim.into_network()
}

fn bench_joins(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-join");
    group.measurement_time(Duration::from_secs(10));

    for size in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("add_vault", size), &size, |b, &size| {
            let mut network = grown_network(size);
            b.iter(|| {
                let vault = network.generate_vault();
                black_box(network.add_vault(vault))
            })
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-churn");

    for size in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(100));
        group.bench_with_input(BenchmarkId::new("mixed_100_steps", size), &size, |b, &size| {
            let mut sim = ChurnSimulation::new(grown_network(size), 1, 0.5);
            b.iter(|| sim.run(100, |_, _| {}))
        });
    }
    group.finish();
}

fn bench_routing(c: &mut Criterion) {
    let network = grown_network(10_000);
    let sections: SectionMap = network
        .sections()
        .map(|s| (s.prefix().key(), s.clone()))
        .collect();
    let mut rng = StdRng::seed_from_u64(0);
    let names: Vec<Identifier> = (0..1_000).map(|_| Identifier::generate(&mut rng)).collect();

    c.bench_function("qc-18-resolve_prefix_1000", |b| {
        b.iter(|| {
            for name in &names {
                black_box(resolve_prefix(&sections, name));
            }
        })
    });
}

criterion_group!(benches, bench_joins, bench_churn, bench_routing);
criterion_main!(benches);
