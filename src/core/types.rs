/// Index of a sample within a stream, and the type used to count samples.
///
/// This is just `u64`. The separate name marks variables that count or index
/// samples, as opposed to bins, lags or vector components.
pub type SampleIndex = u64;
