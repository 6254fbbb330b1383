use matchings_core::ResampledState;
use matchings_mcmc::{run_chain, BipartiteMatchingSampler, PermutationSampler, RunConfig};
use matchings_state::{BipartiteMatching, Permutation};

fn all_permutations_of_three() -> Vec<Vec<usize>> {
    vec![
        vec![0, 1, 2],
        vec![0, 2, 1],
        vec![1, 0, 2],
        vec![1, 2, 0],
        vec![2, 0, 1],
        vec![2, 1, 0],
    ]
}

fn long_chain() -> RunConfig {
    RunConfig {
        sweeps: 120_000,
        burn_in: 200,
        ..RunConfig::default()
    }
}

#[test]
fn permutation_chain_converges_to_target() {
    let states = all_permutations_of_three();
    let log_weights = [0.0, -0.5, -1.0, 0.5, -2.0, 0.25];
    let table: Vec<(Vec<usize>, f64)> = states
        .iter()
        .cloned()
        .zip(log_weights.iter().copied())
        .collect();
    let sampler = PermutationSampler::new().with_factor(|state: &Permutation| {
        table
            .iter()
            .find(|(connections, _)| connections.as_slice() == state.connections())
            .map_or(f64::NEG_INFINITY, |(_, weight)| *weight)
    });

    let mut state = Permutation::identity(3);
    let summary = run_chain(&sampler, &mut state, &long_chain().with_master_seed(4242)).unwrap();

    let normalizer: f64 = log_weights.iter().map(|w| w.exp()).sum();
    assert_eq!(summary.visits.len(), 6);
    for (connections, weight) in &table {
        let expected = weight.exp() / normalizer;
        let observed = summary.frequency_of(connections);
        assert!(
            (observed - expected).abs() < 0.01,
            "state {connections:?}: observed {observed}, expected {expected}"
        );
    }
    assert!(summary.acceptance_rate > 0.0 && summary.acceptance_rate < 1.0);
}

#[test]
fn matching_chain_converges_to_target() {
    let bonus = 0.7;
    let sampler = BipartiteMatchingSampler::new()
        .with_factor(move |state: &BipartiteMatching| bonus * state.num_matched() as f64);

    let mut state = BipartiteMatching::empty(2, 2);
    let summary = run_chain(&sampler, &mut state, &long_chain().with_master_seed(99)).unwrap();
    assert_eq!(summary.visits.len(), 7);

    // K(2,2) has one empty matching, four with one edge and two perfect ones.
    let multiplicities = [1.0, 4.0, 2.0];
    let normalizer: f64 = multiplicities
        .iter()
        .enumerate()
        .map(|(k, m)| m * (bonus * k as f64).exp())
        .sum();
    let mut observed = [0.0; 3];
    for visit in &summary.visits {
        let edges = visit.connections.iter().filter(|c| c.is_some()).count();
        observed[edges] += visit.frequency;
    }
    for (k, multiplicity) in multiplicities.iter().enumerate() {
        let expected = multiplicity * (bonus * k as f64).exp() / normalizer;
        assert!(
            (observed[k] - expected).abs() < 0.01,
            "{k} edges: observed {}, expected {expected}",
            observed[k]
        );
    }
}
