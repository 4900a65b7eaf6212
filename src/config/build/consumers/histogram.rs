use crate::config::build::BuildError;
use crate::config::choices::HistogramParameters;
use crate::consumers::Histogram;

impl<S> TryFrom<HistogramParameters> for Histogram<S>
where
    S: Copy + Into<f64>,
{
    type Error = BuildError;

    fn try_from(p: HistogramParameters) -> Result<Self, Self::Error> {
        Histogram::new(p.min_value, p.max_value, p.n_bins, p.scheme).map_err(BuildError::from)
    }
}
