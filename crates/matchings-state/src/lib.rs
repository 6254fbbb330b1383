#![deny(missing_docs)]

//! Permutation and bipartite matching states for the matchings samplers.
//!
//! Both types implement [`matchings_core::ResampledState`]: their
//! `sample_uniform` draws uniformly over the whole support, independently of
//! the current value, and rewrites the connection sequence in place.

mod bipartite;
mod hash;
mod permutation;

pub use bipartite::BipartiteMatching;
pub use hash::CanonicalHash;
pub use permutation::Permutation;
