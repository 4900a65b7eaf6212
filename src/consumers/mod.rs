mod consumer;
mod histogram;
mod mean_value;
mod spurious_autocovariance;

pub use consumer::Consumer;
pub use histogram::{Histogram, HistogramBin, SubdivisionScheme};
pub use mean_value::MeanValue;
pub use spurious_autocovariance::{DEFAULT_LAG_DEPTH, SpuriousAutocovariance};
