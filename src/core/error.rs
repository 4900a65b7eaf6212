use thiserror::Error;

/// Rejected accumulator configuration.
///
/// Configuration is validated once, at construction. The per-sample paths
/// (`consume`/`get`) never fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("lag depth must be at least 1")]
    ZeroLagDepth,

    #[error("number of bins must be at least 1")]
    ZeroBins,

    #[error("histogram bounds must be finite (min={min}, max={max})")]
    NonFiniteBound { min: f64, max: f64 },

    #[error("histogram range is too wide to subdivide (min={min}, max={max})")]
    NonFiniteWidth { min: f64, max: f64 },

    #[error("histogram range is empty (min={min}, max={max})")]
    EmptyRange { min: f64, max: f64 },

    #[error("logarithmic binning needs a positive lower bound, got {0}")]
    NonPositiveLogMinimum(f64),
}
