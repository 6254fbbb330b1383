#![deny(missing_docs)]

//! Core traits and shared types for the matchings samplers.
//!
//! A sampler only needs two capabilities from the model it runs inside:
//! a [`ResampledState`] exposing an ordered connection sequence that can be
//! redrawn uniformly in place, and a set of [`LogScaleFactor`] terms whose sum
//! is the unnormalized log target density of that state.

use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, MatchingsError};
pub use rng::{derive_substream_seed, RngHandle};

/// Latent combinatorial variable that can be redrawn uniformly from its support.
///
/// Implementations own a fixed-length sequence of connections. Both
/// [`connections_mut`](ResampledState::connections_mut) and
/// [`sample_uniform`](ResampledState::sample_uniform) act on the same buffer
/// for the lifetime of the value: the sequence is rewritten element by element
/// and never swapped for a different container.
pub trait ResampledState {
    /// One entry of the connection sequence.
    type Connection: Copy + PartialEq + Eq + Hash + Debug;

    /// Read-only view of the connection sequence.
    fn connections(&self) -> &[Self::Connection];

    /// Mutable view of the connection sequence.
    fn connections_mut(&mut self) -> &mut [Self::Connection];

    /// Replaces the contents with a fresh draw, uniform over the full support
    /// and independent of the current value.
    fn sample_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R);

    /// Number of entries in the connection sequence.
    fn len(&self) -> usize {
        self.connections().len()
    }

    /// Returns `true` when the connection sequence is empty.
    fn is_empty(&self) -> bool {
        self.connections().is_empty()
    }
}

/// Additive contributor to the unnormalized log target density.
///
/// Evaluation must be pure: the same state always yields the same value and
/// no state is mutated. `f64::NEG_INFINITY` marks an infeasible state.
pub trait LogScaleFactor<S: ?Sized> {
    /// Log density contribution for `state`.
    fn log_density(&self, state: &S) -> f64;
}

impl<S: ?Sized, F> LogScaleFactor<S> for F
where
    F: Fn(&S) -> f64,
{
    fn log_density(&self, state: &S) -> f64 {
        self(state)
    }
}
