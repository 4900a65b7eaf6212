use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reproducible stream of autocorrelated samples.
///
/// Every component follows an independent AR(1) process
/// `x_t = phi * x_{t-1} + scale * e_t`, with `e_t` uniform on `[-sqrt(3), sqrt(3)]`
/// (unit variance) and `x_0 = 0`. Handy for exercising accumulators that care
/// about serial correlation.
#[derive(Debug)]
pub struct Ar1Stream {
    seed: u64,
    rng: StdRng,
    phi: f64,
    scale: f64,
    state: Vec<f64>,
}

impl Ar1Stream {
    pub fn new(dim: usize, phi: f64, seed: u64) -> Self {
        assert!(dim > 0, "dimension must be positive");
        assert!(phi.abs() < 1.0, "|phi| must be < 1 for a stationary process");
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            phi,
            scale: 1.0,
            state: vec![0.0; dim],
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn dim(&self) -> usize {
        self.state.len()
    }

    /// Reseeds the generator and clears the process state.
    pub fn restart(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.state.iter_mut().for_each(|x| *x = 0.0);
    }

    pub fn take_samples(&mut self, n: usize) -> Vec<Vec<f64>> {
        self.by_ref().take(n).collect()
    }

    /// First component of the next `n` samples.
    pub fn take_scalars(&mut self, n: usize) -> Vec<f64> {
        self.by_ref().take(n).map(|s| s[0]).collect()
    }
}

impl Iterator for Ar1Stream {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Vec<f64>> {
        let half_width = 3f64.sqrt();
        for x in self.state.iter_mut() {
            let noise: f64 = self.rng.random_range(-half_width..half_width);
            *x = self.phi * *x + self.scale * noise;
        }
        Some(self.state.clone())
    }
}
