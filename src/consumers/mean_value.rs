use crate::consumers::Consumer;
use crate::core::{AuxiliaryData, RunningMean, Sample, SampleIndex};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Running mean of all samples seen so far.
///
/// Updates follow [`RunningMean`], so the result is the arithmetic mean of the
/// stream (up to rounding) without ever storing a running sum. Works for
/// scalar and vector samples alike.
pub struct MeanValue<S: Sample> {
    state: Mutex<RunningMean<S>>,
}

impl<S: Sample> MeanValue<S> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RunningMean::new()),
        }
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, RunningMean<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Sample> Default for MeanValue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sample> Consumer<S> for MeanValue<S> {
    type Output = S;

    fn consume(&self, sample: S, _aux_data: AuxiliaryData) {
        self.lock().add(sample);
    }

    /// Current mean, or `S::default()` before the first sample.
    fn get(&self) -> S {
        self.lock().mean().clone()
    }

    fn n_samples(&self) -> SampleIndex {
        self.lock().count()
    }
}
