use matchings_core::RngHandle;
use matchings_mcmc::{run_chain, BipartiteMatchingSampler, PermutationSampler, RunConfig};
use matchings_state::{BipartiteMatching, Permutation};

#[test]
fn both_infeasible_states_are_rejected() {
    let sampler = PermutationSampler::new().with_factor(|_: &Permutation| f64::NEG_INFINITY);
    let initial = Permutation::from_connections(vec![2, 0, 1, 3]).unwrap();

    for seed in 0..300 {
        let mut state = initial.clone();
        let outcome = sampler
            .execute(&mut state, &mut RngHandle::from_seed(seed))
            .unwrap();
        assert!(outcome.acceptance_prob.is_nan());
        assert!(!outcome.accepted);
        assert_eq!(state, initial);
    }
}

#[test]
fn positive_infinities_are_rejected_too() {
    let sampler =
        BipartiteMatchingSampler::new().with_factor(|_: &BipartiteMatching| f64::INFINITY);
    let initial = BipartiteMatching::from_connections(vec![Some(1), Some(0)], 2).unwrap();
    let mut state = initial.clone();
    let mut rng = RngHandle::from_seed(6);
    for _ in 0..100 {
        let outcome = sampler.execute(&mut state, &mut rng).unwrap();
        assert!(!outcome.accepted);
        assert_eq!(state, initial);
    }
}

#[test]
fn nan_factor_values_are_rejected() {
    let sampler = PermutationSampler::new().with_factor(|_: &Permutation| f64::NAN);
    let mut state = Permutation::identity(3);
    let outcome = sampler
        .execute(&mut state, &mut RngHandle::from_seed(3))
        .unwrap();
    assert!(!outcome.accepted);
    assert_eq!(state, Permutation::identity(3));
}

#[test]
fn chain_counts_undefined_ratios() {
    let sampler = PermutationSampler::new().with_factor(|_: &Permutation| f64::NEG_INFINITY);
    let mut state = Permutation::identity(3);
    let config = RunConfig {
        sweeps: 50,
        ..RunConfig::default()
    }
    .with_master_seed(11);
    let summary = run_chain(&sampler, &mut state, &config).unwrap();
    assert_eq!(summary.proposed, 50);
    assert_eq!(summary.accepted, 0);
    assert_eq!(summary.nan_rejections, 50);
    assert_eq!(summary.mean_acceptance_prob, 0.0);
    assert_eq!(summary.final_connections, vec![0, 1, 2]);
}
