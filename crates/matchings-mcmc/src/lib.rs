#![deny(missing_docs)]

//! Metropolis-Hastings independence sampling of permutations and bipartite
//! matchings.
//!
//! The sampler proposes a fresh state drawn uniformly from the whole support
//! and accepts it with probability `min(1, exp(new - old))`, where `old` and
//! `new` are sums over the log-density factors connected to the variable.
//! Rejected proposals are undone in place.

/// Acceptance rule and Bernoulli draw.
pub mod acceptance;
/// Chain driver and run summaries.
pub mod chain;
/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Run manifest serialization helpers.
pub mod manifest;
/// Per-step metrics and visit counts.
pub mod metrics;
/// Generic independence sampler and its two specializations.
pub mod sampler;

pub use acceptance::{acceptance_probability, bernoulli};
pub use chain::{run_chain, run_chain_with_rng, ChainSummary};
pub use config::{OutputConfig, RunConfig, SeedPolicy};
pub use manifest::RunManifest;
pub use metrics::{MetricsRecorder, StepSample, VisitCount};
pub use sampler::{
    BipartiteMatchingSampler, IndependenceSampler, PermutationSampler, StepOutcome,
};
