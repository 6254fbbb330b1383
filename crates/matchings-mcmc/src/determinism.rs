use matchings_core::{derive_substream_seed, RngHandle};

/// Derives the deterministic seed used for a specific chain.
pub fn chain_seed(master_seed: u64, chain_index: usize) -> u64 {
    derive_substream_seed(master_seed, chain_index as u64)
}

/// RNG handle for a specific chain of a run.
pub fn chain_rng(master_seed: u64, chain_index: usize) -> RngHandle {
    RngHandle::substream(master_seed, chain_index as u64)
}
