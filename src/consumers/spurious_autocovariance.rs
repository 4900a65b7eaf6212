use crate::consumers::Consumer;
use crate::core::{AuxiliaryData, ConfigError, RunningMean, Sample, SampleIndex};
use log::{debug, trace};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lag depth used when none is configured.
pub const DEFAULT_LAG_DEPTH: usize = 10;

/// Online estimate of the lag-`l` autocovariance of a vector-valued stream,
/// for every `l` in `1..=k`:
///
/// ```text
/// gamma(l) = 1/n * sum_{t=1}^{n-l} (x_{t+l} - mean)^T (x_t - mean)
/// ```
///
/// where `mean` is the mean of all `n` samples. Dividing by `n` rather than
/// by the number of pairs `n - l` makes this a biased ("spurious") estimator,
/// not the textbook autocovariance.
///
/// Expanding the product gives
///
/// ```text
/// gamma(l) = alpha(l) - mean^T beta(l) + (n - l) / n * mean^T mean
/// alpha(l) = 1/n * sum_{t=1}^{n-l} x_{t+l}^T x_t
/// beta(l)  = 1/n * sum_{t=1}^{n-l} (x_{t+l} + x_t)
/// ```
///
/// `alpha` and `beta` are running averages with the same Welford update as the
/// mean. Each new sample only needs its `k` predecessors, kept in a sliding
/// window, so state is `O(k * dim)` and work per sample is `O(k * dim)`.
///
/// The lag structure follows arrival order. With several producers feeding
/// one instance, which samples end up `l` apart depends on thread scheduling.
pub struct SpuriousAutocovariance<S: Sample> {
    lag_depth: usize,
    state: Mutex<AutocovarianceState<S>>,
}

struct AutocovarianceState<S: Sample> {
    mean: RunningMean<S>,
    /// `alpha[i]` belongs to lag `i + 1`.
    alpha: Vec<f64>,
    /// `beta[i]` belongs to lag `i + 1`. Sized on the first sample.
    beta: Vec<S>,
    /// Last `min(n, k)` samples, newest first.
    window: VecDeque<S>,
    estimate: Vec<f64>,
}

impl<S: Sample> SpuriousAutocovariance<S> {
    /// Tracks lags `1..=lag_depth`.
    pub fn new(lag_depth: usize) -> Result<Self, ConfigError> {
        if lag_depth == 0 {
            return Err(ConfigError::ZeroLagDepth);
        }
        debug!("spurious autocovariance tracking lags 1..={lag_depth}");

        Ok(Self {
            lag_depth,
            state: Mutex::new(AutocovarianceState {
                mean: RunningMean::new(),
                alpha: vec![0.0; lag_depth],
                beta: Vec::with_capacity(lag_depth),
                window: VecDeque::with_capacity(lag_depth),
                estimate: vec![0.0; lag_depth],
            }),
        })
    }

    pub fn lag_depth(&self) -> usize {
        self.lag_depth
    }

    /// Number of samples currently held for pairing; never above `lag_depth`.
    pub fn window_len(&self) -> usize {
        self.lock().window.len()
    }

    /// Current mean of the stream.
    pub fn mean(&self) -> S {
        self.lock().mean.mean().clone()
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, AutocovarianceState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Sample> AutocovarianceState<S> {
    fn push(&mut self, sample: S, lag_depth: usize) {
        let n = self.mean.count() + 1;

        if n == 1 {
            trace!("autocovariance sample dimension is {}", sample.dim());
            let zero = sample.zeroed_like();
            self.alpha.iter_mut().for_each(|a| *a = 0.0);
            self.beta.clear();
            self.beta.resize(lag_depth, zero);
            self.window.push_front(sample.clone());
            self.mean.add(sample);
            return;
        }

        // During warm-up only lags whose partner is already in the window move.
        let steady = self.window.len() == lag_depth;

        // Arithmetic runs on copies; nothing is written until all of it succeeded.
        let mut staged = Vec::with_capacity(self.window.len());
        for (i, past) in self.window.iter().enumerate() {
            let mut alpha = self.alpha[i];
            alpha.welford_update(&sample.dot(past), n);

            let mut pair = sample.clone();
            pair.add_assign(past);
            let mut beta = self.beta[i].clone();
            beta.welford_update(&pair, n);

            staged.push((alpha, beta));
        }
        let mut mean = self.mean.clone();
        mean.add(sample.clone());

        for (i, (alpha, beta)) in staged.into_iter().enumerate() {
            self.alpha[i] = alpha;
            self.beta[i] = beta;
        }
        self.mean = mean;
        if steady {
            self.window.pop_back();
        }
        self.window.push_front(sample);

        if steady {
            self.recompute_estimate(n);
        }
    }

    fn recompute_estimate(&mut self, n: SampleIndex) {
        let mean = self.mean.mean();
        let mean_sq = mean.dot(mean);
        let n_f = n as f64;
        for (i, gamma) in self.estimate.iter_mut().enumerate() {
            let lag = (i + 1) as f64;
            *gamma = self.alpha[i] - mean.dot(&self.beta[i]) + (n_f - lag) / n_f * mean_sq;
        }
    }
}

impl<S: Sample> Consumer<S> for SpuriousAutocovariance<S> {
    /// `gamma(1), ..., gamma(k)`, i.e. the `k x 1` column of estimates.
    type Output = Vec<f64>;

    fn consume(&self, sample: S, _aux_data: AuxiliaryData) {
        let lag_depth = self.lag_depth;
        self.lock().push(sample, lag_depth);
    }

    /// All zeros until the window has filled, i.e. for the first `k` samples.
    fn get(&self) -> Vec<f64> {
        self.lock().estimate.clone()
    }

    fn n_samples(&self) -> SampleIndex {
        self.lock().mean.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Ar1Stream;
    use std::panic::{self, AssertUnwindSafe};
    use std::thread;
    const EPS: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn feed<S: Sample>(ac: &SpuriousAutocovariance<S>, samples: &[S]) {
        for s in samples {
            ac.consume(s.clone(), AuxiliaryData::new());
        }
    }

    /// Direct evaluation of the defining sum over the whole stream.
    fn batch_gamma(samples: &[Vec<f64>], lag: usize) -> f64 {
        let n = samples.len();
        let dim = samples[0].len();
        let mean: Vec<f64> = (0..dim)
            .map(|j| samples.iter().map(|s| s[j]).sum::<f64>() / n as f64)
            .collect();
        let mut sum = 0.0;
        for t in 0..n - lag {
            for j in 0..dim {
                sum += (samples[t + lag][j] - mean[j]) * (samples[t][j] - mean[j]);
            }
        }
        sum / n as f64
    }

    #[test]
    fn ctor_rejects_zero_lag_depth() {
        assert_eq!(
            SpuriousAutocovariance::<Vec<f64>>::new(0).err(),
            Some(ConfigError::ZeroLagDepth)
        );
        let ac = SpuriousAutocovariance::<Vec<f64>>::new(3).unwrap();
        assert_eq!(ac.lag_depth(), 3);
        assert_eq!(ac.get(), vec![0.0; 3]);
        assert_eq!(ac.n_samples(), 0);
    }

    #[test]
    fn zero_after_first_sample() {
        let ac = SpuriousAutocovariance::new(4).unwrap();
        feed(&ac, &[vec![3.0, -1.0]]);
        assert_eq!(ac.get(), vec![0.0; 4]);
        assert_eq!(ac.n_samples(), 1);
        assert_eq!(ac.window_len(), 1);
        assert_eq!(ac.mean(), vec![3.0, -1.0]);
    }

    #[test]
    fn zero_during_warm_up() {
        let ac = SpuriousAutocovariance::new(3).unwrap();
        feed(&ac, &[vec![1.0], vec![5.0], vec![-2.0]]);
        assert_eq!(ac.window_len(), 3);
        assert_eq!(ac.get(), vec![0.0; 3]);

        feed(&ac, &[vec![4.0]]);
        assert!(ac.get().iter().any(|&g| g != 0.0));
    }

    #[test]
    fn window_never_exceeds_lag_depth() {
        let ac = SpuriousAutocovariance::new(5).unwrap();
        for (i, s) in Ar1Stream::new(2, 0.3, 1).take_samples(200).into_iter().enumerate() {
            ac.consume(s, AuxiliaryData::new());
            assert_eq!(ac.window_len(), (i + 1).min(5));
        }
        assert_eq!(ac.n_samples(), 200);
    }

    #[test]
    fn mismatched_sample_leaves_state_untouched() {
        let samples = vec![vec![1.0, 2.0], vec![3.0, -4.0], vec![0.5, 6.0], vec![2.0, 2.0]];
        let ac = SpuriousAutocovariance::new(2).unwrap();
        feed(&ac, &samples[..3]);
        let before = (ac.get(), ac.mean(), ac.n_samples(), ac.window_len());

        let bad = panic::catch_unwind(AssertUnwindSafe(|| {
            ac.consume(vec![7.0], AuxiliaryData::new());
        }));
        assert!(bad.is_err());
        assert_eq!((ac.get(), ac.mean(), ac.n_samples(), ac.window_len()), before);

        // The poisoned lock is recovered and the stream carries on.
        feed(&ac, &samples[3..]);
        let clean = SpuriousAutocovariance::new(2).unwrap();
        feed(&clean, &samples);
        assert_eq!(ac.get(), clean.get());
        assert_eq!(ac.n_samples(), 4);
    }

    #[test]
    fn correction_term_uses_fractional_weight() {
        // Lag 1 after two samples: a truncating (n - 1) / n would give -1.25.
        let ac = SpuriousAutocovariance::new(1).unwrap();
        feed(&ac, &[1.0_f64, 2.0]);
        let got = ac.get();
        assert_eq!(got.len(), 1);
        assert!(approx_eq(got[0], -0.125, EPS), "got={}", got[0]);
    }

    #[test]
    fn constant_stream_has_zero_autocovariance() {
        let ac = SpuriousAutocovariance::new(4).unwrap();
        let samples = vec![vec![2.5, -7.0, 1.0]; 50];
        feed(&ac, &samples);
        for g in ac.get() {
            assert!(approx_eq(g, 0.0, 1e-9), "g={g}");
        }
    }

    #[test]
    fn matches_defining_sum() {
        let samples = Ar1Stream::new(3, 0.8, 2024).take_samples(400);
        let ac = SpuriousAutocovariance::new(6).unwrap();
        feed(&ac, &samples);

        let got = ac.get();
        assert_eq!(got.len(), 6);
        for lag in 1..=6 {
            let want = batch_gamma(&samples, lag);
            assert!(
                approx_eq(got[lag - 1], want, 1e-8),
                "lag={lag}, got={}, want={want}",
                got[lag - 1]
            );
        }
    }

    #[test]
    fn matches_defining_sum_right_after_warm_up() {
        let samples = Ar1Stream::new(2, 0.5, 9).take_samples(4);
        let ac = SpuriousAutocovariance::new(3).unwrap();
        feed(&ac, &samples);
        let got = ac.get();
        for lag in 1..=3 {
            assert!(approx_eq(got[lag - 1], batch_gamma(&samples, lag), 1e-10));
        }
    }

    #[test]
    fn correlated_stream_decays_with_lag() {
        let samples = Ar1Stream::new(1, 0.9, 11).take_samples(20_000);
        let ac = SpuriousAutocovariance::new(5).unwrap();
        feed(&ac, &samples);

        let got = ac.get();
        assert!(got[0] > 0.0);
        assert!(got[0] > got[2] && got[2] > got[4], "{got:?}");
    }

    #[test]
    fn scalar_and_one_dimensional_vector_agree() {
        let samples = Ar1Stream::new(1, 0.6, 5).take_samples(100);
        let scalars: Vec<f64> = samples.iter().map(|s| s[0]).collect();

        let vector = SpuriousAutocovariance::new(3).unwrap();
        let scalar = SpuriousAutocovariance::new(3).unwrap();
        feed(&vector, &samples);
        feed(&scalar, &scalars);

        for (a, b) in vector.get().iter().zip(scalar.get()) {
            assert!(approx_eq(*a, b, 1e-12));
        }
    }

    #[test]
    fn concurrent_consumers_lose_no_updates() {
        const THREADS: usize = 6;
        const PER_THREAD: usize = 500;

        let ac = SpuriousAutocovariance::<Vec<f64>>::new(4).unwrap();
        thread::scope(|scope| {
            for t in 0..THREADS {
                let ac = &ac;
                scope.spawn(move || {
                    for s in Ar1Stream::new(2, 0.4, t as u64).take_samples(PER_THREAD) {
                        ac.consume(s, AuxiliaryData::new());
                        let snapshot = ac.get();
                        assert_eq!(snapshot.len(), 4);
                        assert!(snapshot.iter().all(|g| g.is_finite()));
                    }
                });
            }
        });

        assert_eq!(ac.n_samples(), (THREADS * PER_THREAD) as SampleIndex);
        assert_eq!(ac.window_len(), 4);
    }

    #[test]
    fn constant_stream_is_order_independent_across_threads() {
        let ac = SpuriousAutocovariance::<Vec<f64>>::new(3).unwrap();
        thread::scope(|scope| {
            for _ in 0..4 {
                let ac = &ac;
                scope.spawn(move || {
                    for _ in 0..250 {
                        ac.consume(vec![1.5, -0.5], AuxiliaryData::new());
                    }
                });
            }
        });
        for g in ac.get() {
            assert!(approx_eq(g, 0.0, 1e-9));
        }
        assert!(approx_eq(ac.mean()[0], 1.5, EPS));
    }
}
