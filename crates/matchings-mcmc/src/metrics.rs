use std::fmt::Debug;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::sampler::StepOutcome;

/// State recorded after a post burn-in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSample<C> {
    /// Zero-based step index, burn-in included.
    pub step: usize,
    /// Whether the step kept its proposal.
    pub accepted: bool,
    /// Acceptance probability of the step.
    pub acceptance_prob: f64,
    /// Log density of the state after the step.
    pub log_density: f64,
    /// Connections after the step.
    pub connections: Vec<C>,
}

/// Number of recorded samples that landed on one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitCount<C> {
    /// Connections identifying the state.
    pub connections: Vec<C>,
    /// Number of recorded samples at this state.
    pub count: usize,
    /// `count` divided by the number of recorded samples.
    pub frequency: f64,
}

/// Collects per-step outcomes and recorded states for one chain.
#[derive(Debug)]
pub struct MetricsRecorder<C> {
    samples: Vec<StepSample<C>>,
    visits: IndexMap<Vec<C>, usize>,
    proposed: usize,
    accepted: usize,
    nan_rejections: usize,
    acceptance_sum: f64,
}

impl<C> Default for MetricsRecorder<C> {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            visits: IndexMap::new(),
            proposed: 0,
            accepted: 0,
            nan_rejections: 0,
            acceptance_sum: 0.0,
        }
    }
}

impl<C: Copy + Eq + Hash + Debug> MetricsRecorder<C> {
    /// Creates a new recorder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the outcome of one step.
    pub fn note_step(&mut self, outcome: &StepOutcome) {
        self.proposed += 1;
        if outcome.accepted {
            self.accepted += 1;
        }
        if outcome.acceptance_prob.is_nan() {
            self.nan_rejections += 1;
        } else {
            self.acceptance_sum += outcome.acceptance_prob;
        }
    }

    /// Records the state left behind by a step.
    pub fn push_sample(&mut self, step: usize, outcome: &StepOutcome, connections: &[C]) {
        *self.visits.entry(connections.to_vec()).or_insert(0) += 1;
        self.samples.push(StepSample {
            step,
            accepted: outcome.accepted,
            acceptance_prob: outcome.acceptance_prob,
            log_density: outcome.current_log_density(),
            connections: connections.to_vec(),
        });
    }

    /// Recorded samples in step order.
    pub fn samples(&self) -> &[StepSample<C>] {
        &self.samples
    }

    /// Consumes the recorder, returning its samples.
    pub fn into_samples(self) -> Vec<StepSample<C>> {
        self.samples
    }

    /// Proposals counted so far.
    pub fn proposed(&self) -> usize {
        self.proposed
    }

    /// Accepted proposals counted so far.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Steps rejected because the acceptance ratio was undefined.
    pub fn nan_rejections(&self) -> usize {
        self.nan_rejections
    }

    /// Fraction of proposals accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposed as f64
        }
    }

    /// Mean acceptance probability over steps with a defined ratio.
    pub fn mean_acceptance_prob(&self) -> f64 {
        let defined = self.proposed - self.nan_rejections;
        if defined == 0 {
            0.0
        } else {
            self.acceptance_sum / defined as f64
        }
    }

    /// Visit counts per recorded state, in first-visit order.
    pub fn visits(&self) -> Vec<VisitCount<C>> {
        let total = self.samples.len().max(1) as f64;
        self.visits
            .iter()
            .map(|(connections, &count)| VisitCount {
                connections: connections.clone(),
                count,
                frequency: count as f64 / total,
            })
            .collect()
    }

    /// Empirical frequency of one state among the recorded samples.
    pub fn frequency_of(&self, connections: &[C]) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let count = self.visits.get(connections).copied().unwrap_or(0);
        count as f64 / self.samples.len() as f64
    }

    /// Writes the recorded samples to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        writeln!(file, "step,accepted,acceptance_prob,log_density,connections")?;
        for sample in &self.samples {
            let connections: Vec<String> = sample
                .connections
                .iter()
                .map(|connection| format!("{connection:?}"))
                .collect();
            writeln!(
                file,
                "{},{},{:.6},{:.6},{}",
                sample.step,
                sample.accepted,
                sample.acceptance_prob,
                sample.log_density,
                connections.join(" ")
            )?;
        }
        file.flush()
    }
}
