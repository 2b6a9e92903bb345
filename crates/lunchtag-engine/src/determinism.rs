use lunchtag_core::derive_substream_seed;

/// Derives the seed for one attempt of a run.
pub fn attempt_seed(master_seed: u64, attempt: usize) -> u64 {
    derive_substream_seed(master_seed, attempt as u64)
}

/// Derives the seed used to shuffle one stratum during one attempt.
pub fn shuffle_seed(master_seed: u64, attempt: usize, stratum_index: usize) -> u64 {
    derive_substream_seed(attempt_seed(master_seed, attempt), stratum_index as u64)
}
