use criterion::{criterion_group, criterion_main, Criterion};
use matchings_core::{ResampledState, RngHandle};
use matchings_mcmc::{run_chain, BipartiteMatchingSampler, PermutationSampler, RunConfig};
use matchings_state::{BipartiteMatching, Permutation};

fn bench_permutation_steps(c: &mut Criterion) {
    let sampler = PermutationSampler::new().with_factor(|state: &Permutation| {
        state
            .connections()
            .iter()
            .enumerate()
            .map(|(position, &label)| -(position.abs_diff(label) as f64))
            .sum::<f64>()
    });
    let mut state = Permutation::identity(64);
    let mut rng = RngHandle::from_seed(42);

    c.bench_function("permutation_step_n64", |b| {
        b.iter(|| sampler.execute(&mut state, &mut rng).unwrap())
    });
}

fn bench_matching_chain(c: &mut Criterion) {
    let sampler = BipartiteMatchingSampler::new()
        .with_factor(|state: &BipartiteMatching| 0.1 * state.num_matched() as f64);
    let config = RunConfig {
        sweeps: 200,
        ..RunConfig::default()
    }
    .with_master_seed(42);

    c.bench_function("matching_chain_32x40", |b| {
        b.iter(|| {
            let mut state = BipartiteMatching::empty(32, 40);
            run_chain(&sampler, &mut state, &config).unwrap()
        })
    });
}

criterion_group!(benches, bench_permutation_steps, bench_matching_chain);
criterion_main!(benches);
