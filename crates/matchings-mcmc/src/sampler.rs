use std::fmt;

use log::{debug, warn};
use matchings_core::errors::ErrorInfo;
use matchings_core::{LogScaleFactor, MatchingsError, ResampledState};
use matchings_state::{BipartiteMatching, Permutation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::acceptance::{acceptance_probability, bernoulli};

/// Result of a single Metropolis-Hastings step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Whether the uniform proposal was kept.
    pub accepted: bool,
    /// Acceptance probability; `NaN` when the density ratio was undefined.
    pub acceptance_prob: f64,
    /// Summed log density of the state before the proposal.
    pub old_log_density: f64,
    /// Summed log density of the proposal.
    pub new_log_density: f64,
}

impl StepOutcome {
    /// Log density of the state the step left behind.
    pub fn current_log_density(&self) -> f64 {
        if self.accepted {
            self.new_log_density
        } else {
            self.old_log_density
        }
    }
}

/// Metropolis-Hastings sampler with a uniform independence proposal.
///
/// Holds the log-density factors connected to one latent variable. Each call
/// to [`execute`](IndependenceSampler::execute) redraws the variable uniformly
/// from its support and keeps the draw with probability
/// `min(1, exp(new - old))`; on rejection the previous connections are copied
/// back into the same buffer, so anything reading the state through the
/// caller's handle sees the prior value.
pub struct IndependenceSampler<'a, S: ResampledState> {
    factors: Vec<Box<dyn LogScaleFactor<S> + 'a>>,
}

/// Sampler over full permutations.
pub type PermutationSampler<'a> = IndependenceSampler<'a, Permutation>;

/// Sampler over (possibly partial) bipartite matchings.
pub type BipartiteMatchingSampler<'a> = IndependenceSampler<'a, BipartiteMatching>;

impl<'a, S: ResampledState> IndependenceSampler<'a, S> {
    /// Sampler with no connected factors; every proposal is accepted.
    pub fn new() -> Self {
        Self {
            factors: Vec::new(),
        }
    }

    /// Sampler over an explicit list of connected factors.
    pub fn with_factors(factors: Vec<Box<dyn LogScaleFactor<S> + 'a>>) -> Self {
        Self { factors }
    }

    /// Adds one connected factor.
    pub fn with_factor(mut self, factor: impl LogScaleFactor<S> + 'a) -> Self {
        self.factors.push(Box::new(factor));
        self
    }

    /// Number of connected factors.
    pub fn num_factors(&self) -> usize {
        self.factors.len()
    }

    /// Sum of the connected factors' log densities at `state`; `0.0` without factors.
    pub fn log_density(&self, state: &S) -> f64 {
        self.factors
            .iter()
            .fold(0.0, |total, factor| total + factor.log_density(state))
    }

    /// Performs one Metropolis-Hastings step on `state`.
    ///
    /// Randomness is consumed in a fixed order: the uniform redraw, then one
    /// Bernoulli variate. Returns [`MatchingsError::Contract`] if the redraw
    /// changed the length of the connection sequence.
    pub fn execute<R: Rng + ?Sized>(
        &self,
        state: &mut S,
        rng: &mut R,
    ) -> Result<StepOutcome, MatchingsError> {
        let snapshot = state.connections().to_vec();
        let old_log_density = self.log_density(state);

        state.sample_uniform(rng);
        if state.len() != snapshot.len() {
            warn!(
                "uniform redraw changed connection count from {} to {}",
                snapshot.len(),
                state.len()
            );
            return Err(MatchingsError::Contract(
                ErrorInfo::new(
                    "proposal-length-mismatch",
                    "uniform redraw changed the length of the connection sequence",
                )
                .with_context("expected", snapshot.len())
                .with_context("actual", state.len())
                .with_hint("sample_uniform must rewrite the sequence in place"),
            ));
        }
        let new_log_density = self.log_density(state);

        let acceptance_prob = acceptance_probability(old_log_density, new_log_density);
        if acceptance_prob.is_nan() {
            warn!(
                "undefined acceptance ratio (old={old_log_density}, new={new_log_density}); rejecting"
            );
        }
        let accepted = bernoulli(rng, acceptance_prob);
        if !accepted {
            state.connections_mut().copy_from_slice(&snapshot);
        }
        debug!(
            "mh step: accepted={accepted} alpha={acceptance_prob:.6} old={old_log_density:.6} new={new_log_density:.6}"
        );

        Ok(StepOutcome {
            accepted,
            acceptance_prob,
            old_log_density,
            new_log_density,
        })
    }
}

impl<S: ResampledState> Default for IndependenceSampler<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ResampledState> fmt::Debug for IndependenceSampler<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndependenceSampler")
            .field("factors", &self.factors.len())
            .finish()
    }
}
