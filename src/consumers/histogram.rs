use crate::consumers::Consumer;
use crate::core::{AuxiliaryData, ConfigError, SampleIndex};
use log::{debug, trace};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use strum_macros::{Display, EnumString};

/// How `[min_value, max_value]` is cut into bins.
///
/// - `Linear`: bins of equal width.
/// - `Logarithmic`: bins of equal width in `ln` space, i.e. every bin has the
///   same right/left ratio. Needs `min_value > 0`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubdivisionScheme {
    #[default]
    Linear,
    Logarithmic,
}

/// One bin of a histogram snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub left: f64,
    pub right: f64,
    pub count: SampleIndex,
}

struct BinCounts {
    counts: Vec<SampleIndex>,
    accepted: SampleIndex,
}

/// Histogram of a scalar quantity over a fixed range.
///
/// Samples outside `[min_value, max_value]` (and NaN) are dropped without
/// being counted. A sample equal to `max_value` lands in the last bin.
pub struct Histogram<S = f64> {
    min_value: f64,
    max_value: f64,
    n_bins: usize,
    scheme: SubdivisionScheme,
    state: Mutex<BinCounts>,
    _sample: PhantomData<fn(S)>,
}

impl<S> Histogram<S>
where
    S: Copy + Into<f64>,
{
    pub fn new(
        min_value: f64,
        max_value: f64,
        n_bins: usize,
        scheme: SubdivisionScheme,
    ) -> Result<Self, ConfigError> {
        if n_bins == 0 {
            return Err(ConfigError::ZeroBins);
        }
        if !min_value.is_finite() || !max_value.is_finite() {
            return Err(ConfigError::NonFiniteBound {
                min: min_value,
                max: max_value,
            });
        }
        if min_value >= max_value {
            return Err(ConfigError::EmptyRange {
                min: min_value,
                max: max_value,
            });
        }
        // Both bounds finite does not make `max - min` finite.
        if !(max_value - min_value).is_finite() {
            return Err(ConfigError::NonFiniteWidth {
                min: min_value,
                max: max_value,
            });
        }
        if scheme == SubdivisionScheme::Logarithmic && min_value <= 0.0 {
            return Err(ConfigError::NonPositiveLogMinimum(min_value));
        }

        debug!("histogram over [{min_value}, {max_value}] with {n_bins} {scheme} bins");

        Ok(Self {
            min_value,
            max_value,
            n_bins,
            scheme,
            state: Mutex::new(BinCounts {
                counts: vec![0; n_bins],
                accepted: 0,
            }),
            _sample: PhantomData,
        })
    }

    /// Linear histogram, the common case.
    pub fn linear(min_value: f64, max_value: f64, n_bins: usize) -> Result<Self, ConfigError> {
        Self::new(min_value, max_value, n_bins, SubdivisionScheme::Linear)
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    pub fn scheme(&self) -> SubdivisionScheme {
        self.scheme
    }

    /// Writes the histogram as `x y` rows for line plotting tools (Gnuplot:
    /// `set style data lines; plot "file"`).
    ///
    /// Every bin becomes the four corners of a rectangle, bottom-left,
    /// top-left, top-right, bottom-right, followed by an empty row.
    pub fn write_gnuplot<W: Write>(&self, mut w: W) -> Result<(), Error> {
        for bin in self.get() {
            writeln!(w, "{} 0", bin.left)?;
            writeln!(w, "{} {}", bin.left, bin.count)?;
            writeln!(w, "{} {}", bin.right, bin.count)?;
            writeln!(w, "{} 0", bin.right)?;
            writeln!(w)?;
        }
        w.flush()
    }

    /// [`write_gnuplot`](Self::write_gnuplot) into a newly created file.
    pub fn export_gnuplot<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let w = BufWriter::new(File::create(path)?);
        self.write_gnuplot(w)
    }

    /// Bin holding `value`, which must lie inside the range.
    ///
    /// The index is clamped so that `max_value` (and rounding right below it)
    /// maps to the last bin.
    fn bin_number(&self, value: f64) -> usize {
        debug_assert!(value >= self.min_value && value <= self.max_value);
        let n = self.n_bins as f64;
        let position = match self.scheme {
            SubdivisionScheme::Linear => {
                (value - self.min_value) / ((self.max_value - self.min_value) / n)
            }
            SubdivisionScheme::Logarithmic => {
                let log_min = self.min_value.ln();
                (value.ln() - log_min) / ((self.max_value.ln() - log_min) / n)
            }
        };
        position.floor().clamp(0.0, n - 1.0) as usize
    }

    fn edge(&self, i: usize) -> f64 {
        let n = self.n_bins as f64;
        let i = i as f64;
        match self.scheme {
            SubdivisionScheme::Linear => {
                self.min_value + i * ((self.max_value - self.min_value) / n)
            }
            SubdivisionScheme::Logarithmic => {
                let log_min = self.min_value.ln();
                (log_min + i * (self.max_value.ln() - log_min) / n).exp()
            }
        }
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, BinCounts> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> Consumer<S> for Histogram<S>
where
    S: Copy + Into<f64>,
{
    type Output = Vec<HistogramBin>;

    fn consume(&self, sample: S, _aux_data: AuxiliaryData) {
        let value: f64 = sample.into();
        if !(self.min_value..=self.max_value).contains(&value) {
            trace!("histogram dropped out-of-range sample {value}");
            return;
        }

        // Only the counters are shared; the index depends on immutable config.
        let bin = self.bin_number(value);
        let mut state = self.lock();
        state.counts[bin] += 1;
        state.accepted += 1;
    }

    /// One entry per bin, empty bins included, left to right.
    fn get(&self) -> Vec<HistogramBin> {
        let mut bins: Vec<HistogramBin> = (0..self.n_bins)
            .map(|i| HistogramBin {
                left: self.edge(i),
                right: self.edge(i + 1),
                count: 0,
            })
            .collect();

        let state = self.lock();
        for (bin, &count) in bins.iter_mut().zip(state.counts.iter()) {
            bin.count = count;
        }
        bins
    }

    /// Samples that fell inside the range.
    fn n_samples(&self) -> SampleIndex {
        self.lock().accepted
    }
}
