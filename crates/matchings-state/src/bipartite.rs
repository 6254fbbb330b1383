use matchings_core::errors::ErrorInfo;
use matchings_core::{MatchingsError, ResampledState};
use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hash::{self, CanonicalHash};

/// Word written for a free left vertex when hashing.
const FREE_WORD: u64 = u64::MAX;

/// Partial matching between `left` and `right` vertex sets of the complete
/// bipartite graph.
///
/// `connections()[i]` is `Some(j)` when left vertex `i` is matched to right
/// vertex `j` and `None` when it is free. No right vertex appears twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMatching", into = "RawMatching")]
pub struct BipartiteMatching {
    right_size: usize,
    connections: Vec<Option<usize>>,
}

#[derive(Serialize, Deserialize)]
struct RawMatching {
    right_size: usize,
    connections: Vec<Option<usize>>,
}

impl BipartiteMatching {
    /// Matching with every left vertex free.
    pub fn empty(left_size: usize, right_size: usize) -> Self {
        Self {
            right_size,
            connections: vec![None; left_size],
        }
    }

    /// Builds a matching from explicit connections, validating range and injectivity.
    pub fn from_connections(
        connections: Vec<Option<usize>>,
        right_size: usize,
    ) -> Result<Self, MatchingsError> {
        let mut used = vec![false; right_size];
        for (left, partner) in connections.iter().enumerate() {
            let Some(right) = *partner else {
                continue;
            };
            if right >= right_size {
                return Err(MatchingsError::State(
                    ErrorInfo::new("vertex-out-of-range", "right vertex exceeds right size")
                        .with_context("left", left)
                        .with_context("right", right)
                        .with_context("right_size", right_size),
                ));
            }
            if std::mem::replace(&mut used[right], true) {
                return Err(MatchingsError::State(
                    ErrorInfo::new("vertex-matched-twice", "right vertex has two partners")
                        .with_context("left", left)
                        .with_context("right", right)
                        .with_hint("use None for free left vertices"),
                ));
            }
        }
        Ok(Self {
            right_size,
            connections,
        })
    }

    /// Number of left vertices.
    pub fn left_size(&self) -> usize {
        self.connections.len()
    }

    /// Number of right vertices.
    pub fn right_size(&self) -> usize {
        self.right_size
    }

    /// Partner of a left vertex, if any.
    pub fn partner(&self, left: usize) -> Option<usize> {
        self.connections.get(left).copied().flatten()
    }

    /// Number of matched edges.
    pub fn num_matched(&self) -> usize {
        self.connections.iter().filter(|c| c.is_some()).count()
    }

    /// Whether every vertex on the smaller side is matched.
    pub fn is_maximum(&self) -> bool {
        self.num_matched() == self.left_size().min(self.right_size)
    }

    /// Checks range and injectivity.
    pub fn is_valid(&self) -> bool {
        let mut used = vec![false; self.right_size];
        self.connections.iter().flatten().all(|&right| {
            right < used.len() && !std::mem::replace(&mut used[right], true)
        })
    }

    /// Total number of matchings (including the empty one) of `K(left, right)`.
    pub fn matching_count(left_size: usize, right_size: usize) -> f64 {
        let table = ln_factorials(left_size.max(right_size));
        log_edge_count_weights(left_size, right_size, &table)
            .iter()
            .map(|w| w.exp())
            .sum()
    }
}

impl ResampledState for BipartiteMatching {
    type Connection = Option<usize>;

    fn connections(&self) -> &[Option<usize>] {
        &self.connections
    }

    fn connections_mut(&mut self) -> &mut [Option<usize>] {
        &mut self.connections
    }

    /// Draws uniformly over all matchings of `K(left, right)`.
    ///
    /// There are `C(left,k)·C(right,k)·k!` matchings with `k` edges, so `k` is
    /// drawn with that weight first; the endpoints are then a uniform
    /// `k`-subset of the left side paired with a uniformly ordered `k`-subset
    /// of the right side.
    fn sample_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let left_size = self.left_size();
        let table = ln_factorials(left_size.max(self.right_size));
        let weights = log_edge_count_weights(left_size, self.right_size, &table);
        let edges = draw_log_weighted(&weights, rng);

        for slot in self.connections.iter_mut() {
            *slot = None;
        }
        let lefts = index::sample(rng, left_size, edges);
        let mut rights = index::sample(rng, self.right_size, edges).into_vec();
        rights.shuffle(rng);
        for (left, right) in lefts.iter().zip(rights) {
            self.connections[left] = Some(right);
        }
    }
}

impl CanonicalHash for BipartiteMatching {
    fn canonical_hash(&self) -> String {
        let words = std::iter::once(self.right_size as u64).chain(
            self.connections
                .iter()
                .map(|partner| partner.map_or(FREE_WORD, |right| right as u64)),
        );
        hash::digest_words(b"bipartite-matching", words.collect::<Vec<_>>().into_iter())
    }
}

impl TryFrom<RawMatching> for BipartiteMatching {
    type Error = MatchingsError;

    fn try_from(raw: RawMatching) -> Result<Self, Self::Error> {
        Self::from_connections(raw.connections, raw.right_size)
    }
}

impl From<BipartiteMatching> for RawMatching {
    fn from(matching: BipartiteMatching) -> Self {
        RawMatching {
            right_size: matching.right_size,
            connections: matching.connections,
        }
    }
}

fn ln_factorials(max: usize) -> Vec<f64> {
    let mut table = Vec::with_capacity(max + 1);
    let mut acc = 0.0;
    table.push(acc);
    for value in 1..=max {
        acc += (value as f64).ln();
        table.push(acc);
    }
    table
}

/// `ln(C(left,k)·C(right,k)·k!)` for `k = 0..=min(left, right)`.
fn log_edge_count_weights(left: usize, right: usize, ln_fact: &[f64]) -> Vec<f64> {
    let ln_choose = |n: usize, k: usize| ln_fact[n] - ln_fact[k] - ln_fact[n - k];
    (0..=left.min(right))
        .map(|k| ln_choose(left, k) + ln_choose(right, k) + ln_fact[k])
        .collect()
}

/// Inverse-CDF draw of an index from unnormalized log weights; one uniform variate.
fn draw_log_weighted<R: Rng + ?Sized>(log_weights: &[f64], rng: &mut R) -> usize {
    let max = log_weights
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = log_weights.iter().map(|w| (w - max).exp()).collect();
    let total: f64 = weights.iter().sum();
    let mut target = rng.gen::<f64>() * total;
    for (index, weight) in weights.iter().enumerate() {
        if target < *weight {
            return index;
        }
        target -= weight;
    }
    weights.len().saturating_sub(1)
}
