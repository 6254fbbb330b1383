use std::fs;
use std::path::PathBuf;

use log::info;
use matchings_core::errors::ErrorInfo;
use matchings_core::{MatchingsError, ResampledState};
use matchings_state::CanonicalHash;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::determinism;
use crate::manifest::RunManifest;
use crate::metrics::{MetricsRecorder, StepSample, VisitCount};
use crate::sampler::IndependenceSampler;

/// Summary returned to callers after a chain completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSummary<C> {
    /// Proposals issued, burn-in included.
    pub proposed: usize,
    /// Proposals accepted, burn-in included.
    pub accepted: usize,
    /// `accepted / proposed`.
    pub acceptance_rate: f64,
    /// Mean acceptance probability over steps with a defined ratio.
    pub mean_acceptance_prob: f64,
    /// Steps rejected because the density ratio was undefined.
    pub nan_rejections: usize,
    /// Visit counts of the recorded states, in first-visit order.
    pub visits: Vec<VisitCount<C>>,
    /// Connections at the end of the chain.
    pub final_connections: Vec<C>,
    /// Canonical hash of the final state.
    pub final_state_hash: String,
    /// Metrics CSV written during the run.
    pub metrics_path: Option<PathBuf>,
    /// Manifest path, if emitted.
    pub manifest_path: Option<PathBuf>,
    /// Recorded samples (post burn-in, thinned).
    pub samples: Vec<StepSample<C>>,
}

impl<C: PartialEq> ChainSummary<C> {
    /// Empirical frequency of one state among the recorded samples.
    pub fn frequency_of(&self, connections: &[C]) -> f64 {
        self.visits
            .iter()
            .find(|visit| visit.connections.as_slice() == connections)
            .map_or(0.0, |visit| visit.frequency)
    }
}

/// Runs one chain seeded from `config.seed_policy.master_seed` (chain index 0).
pub fn run_chain<S>(
    sampler: &IndependenceSampler<'_, S>,
    state: &mut S,
    config: &RunConfig,
) -> Result<ChainSummary<S::Connection>, MatchingsError>
where
    S: ResampledState + CanonicalHash,
{
    let mut rng = determinism::chain_rng(config.seed_policy.master_seed, 0);
    run_chain_with_rng(sampler, state, config, &mut rng)
}

/// Runs one chain drawing from a caller-supplied random source.
///
/// Executes `burn_in + sweeps` steps. Every step counts towards the
/// acceptance statistics; only post burn-in steps whose offset is a multiple
/// of `thinning` are recorded as samples. Manifests still record the seed
/// policy from `config`, whatever `rng` was seeded with.
pub fn run_chain_with_rng<S, R>(
    sampler: &IndependenceSampler<'_, S>,
    state: &mut S,
    config: &RunConfig,
    rng: &mut R,
) -> Result<ChainSummary<S::Connection>, MatchingsError>
where
    S: ResampledState + CanonicalHash,
    R: Rng + ?Sized,
{
    config.validate()?;
    info!(
        "starting chain: {} burn-in + {} steps, thinning {}, {} factors",
        config.burn_in,
        config.sweeps,
        config.thinning,
        sampler.num_factors()
    );

    let mut recorder = MetricsRecorder::new();
    for step in 0..config.total_steps() {
        let outcome = sampler.execute(state, rng)?;
        recorder.note_step(&outcome);
        if step >= config.burn_in && (step - config.burn_in) % config.thinning == 0 {
            recorder.push_sample(step, &outcome, state.connections());
        }
    }

    let final_state_hash = state.canonical_hash();
    let (metrics_path, manifest_path) = match &config.output.run_directory {
        Some(run_dir) => {
            fs::create_dir_all(run_dir).map_err(|err| {
                MatchingsError::Serde(
                    ErrorInfo::new("run-dir-mkdir", err.to_string())
                        .with_context("path", run_dir.display()),
                )
            })?;
            let metrics_path = run_dir.join(&config.output.metrics_file);
            recorder.write_csv(&metrics_path).map_err(|err| {
                MatchingsError::Serde(
                    ErrorInfo::new("metrics-write", err.to_string())
                        .with_context("path", metrics_path.display()),
                )
            })?;
            let manifest_path = run_dir.join(&config.output.manifest_file);
            RunManifest {
                config: config.clone(),
                master_seed: config.seed_policy.master_seed,
                seed_label: config.seed_policy.label.clone(),
                state_hash: final_state_hash.clone(),
                proposed: recorder.proposed(),
                accepted: recorder.accepted(),
                metrics_file: Some(config.output.metrics_file.clone()),
            }
            .write(&manifest_path)?;
            (Some(metrics_path), Some(manifest_path))
        }
        None => (None, None),
    };

    info!(
        "chain finished: acceptance rate {:.4}, {} undefined ratios, {} distinct states",
        recorder.acceptance_rate(),
        recorder.nan_rejections(),
        recorder.visits().len()
    );

    let proposed = recorder.proposed();
    let accepted = recorder.accepted();
    let acceptance_rate = recorder.acceptance_rate();
    let mean_acceptance_prob = recorder.mean_acceptance_prob();
    let nan_rejections = recorder.nan_rejections();
    let visits = recorder.visits();
    Ok(ChainSummary {
        proposed,
        accepted,
        acceptance_rate,
        mean_acceptance_prob,
        nan_rejections,
        visits,
        final_connections: state.connections().to_vec(),
        final_state_hash,
        metrics_path,
        manifest_path,
        samples: recorder.into_samples(),
    })
}
