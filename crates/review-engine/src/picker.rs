//! Replacement reviewer selection

use rand::Rng;

/// Chooses one entry out of the eligible replacement candidates.
///
/// Implementations must return an index in `0..eligible`; `eligible` is
/// never zero. The default draw is uniform and ignores prior assignment
/// counts.
pub trait CandidatePicker: Send + Sync {
    fn pick(&self, eligible: usize) -> usize;
}

/// Uniform random draw backed by the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPicker;

impl CandidatePicker for UniformPicker {
    fn pick(&self, eligible: usize) -> usize {
        rand::thread_rng().gen_range(0..eligible)
    }
}
