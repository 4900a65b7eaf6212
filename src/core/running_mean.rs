use crate::core::sample::Sample;
use crate::core::types::SampleIndex;

/// Streaming mean using the Welford recurrence:
///
/// ```text
/// mean_1 = x_1
/// mean_n = mean_{n-1} + (x_n - mean_{n-1}) / n
/// ```
///
/// Unlike `sum / n` it never holds an unbounded running sum. Not synchronized;
/// the accumulators wrap it in their own lock.
#[derive(Debug, Clone, Default)]
pub struct RunningMean<S: Sample> {
    mean: S,
    n: SampleIndex,
}

impl<S: Sample> RunningMean<S> {
    pub fn new() -> Self {
        Self {
            mean: S::default(),
            n: 0,
        }
    }

    /// Folds `sample` in. Either both the mean and the count move or neither
    /// does, even if `sample` has the wrong dimension and the update panics.
    pub fn add(&mut self, sample: S) {
        let n = self.n + 1;
        if n == 1 {
            self.mean = sample;
        } else {
            let mut next = self.mean.clone();
            next.welford_update(&sample, n);
            self.mean = next;
        }
        self.n = n;
    }

    /// Current mean, or `S::default()` when nothing was added.
    #[inline]
    pub fn mean(&self) -> &S {
        &self.mean
    }

    #[inline]
    pub fn count(&self) -> SampleIndex {
        self.n
    }
}
