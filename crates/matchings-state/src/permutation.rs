use matchings_core::errors::ErrorInfo;
use matchings_core::{MatchingsError, ResampledState};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hash::{self, CanonicalHash};

/// Bijection from positions `0..n` to labels `0..n`.
///
/// `connections()[i]` is the label assigned to position `i`; every label is
/// used exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation {
    connections: Vec<usize>,
}

impl Permutation {
    /// Identity permutation of the given size.
    pub fn identity(size: usize) -> Self {
        Self {
            connections: (0..size).collect(),
        }
    }

    /// Builds a permutation from explicit connections, validating the bijection.
    pub fn from_connections(connections: Vec<usize>) -> Result<Self, MatchingsError> {
        let size = connections.len();
        let mut seen = vec![false; size];
        for (position, &label) in connections.iter().enumerate() {
            if label >= size {
                return Err(MatchingsError::State(
                    ErrorInfo::new("label-out-of-range", "permutation label exceeds size")
                        .with_context("position", position)
                        .with_context("label", label)
                        .with_context("size", size)
                        .with_hint("labels are zero-based"),
                ));
            }
            if std::mem::replace(&mut seen[label], true) {
                return Err(MatchingsError::State(
                    ErrorInfo::new("label-repeated", "permutation uses a label twice")
                        .with_context("position", position)
                        .with_context("label", label),
                ));
            }
        }
        Ok(Self { connections })
    }

    /// Number of positions.
    pub fn size(&self) -> usize {
        self.connections.len()
    }

    /// Checks the bijection invariant.
    pub fn is_valid(&self) -> bool {
        let mut seen = vec![false; self.size()];
        self.connections
            .iter()
            .all(|&label| label < seen.len() && !std::mem::replace(&mut seen[label], true))
    }

    /// Inverse permutation (label to position).
    pub fn inverse(&self) -> Permutation {
        let mut inverse = vec![0; self.size()];
        for (position, &label) in self.connections.iter().enumerate() {
            inverse[label] = position;
        }
        Permutation {
            connections: inverse,
        }
    }
}

impl ResampledState for Permutation {
    type Connection = usize;

    fn connections(&self) -> &[usize] {
        &self.connections
    }

    fn connections_mut(&mut self) -> &mut [usize] {
        &mut self.connections
    }

    /// Resets to the identity in place, then applies a Fisher-Yates shuffle.
    fn sample_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (position, slot) in self.connections.iter_mut().enumerate() {
            *slot = position;
        }
        self.connections.shuffle(rng);
    }
}

impl CanonicalHash for Permutation {
    fn canonical_hash(&self) -> String {
        hash::digest_words(
            b"permutation",
            self.connections.iter().map(|&label| label as u64),
        )
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = MatchingsError;

    fn try_from(connections: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_connections(connections)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(permutation: Permutation) -> Self {
        permutation.connections
    }
}
