use crate::core::{AuxiliaryData, SampleIndex};

/// Something that reacts to every sample of a stream.
///
/// Producers may run on several threads and feed the same consumer
/// concurrently, so both methods take `&self`: implementations guard their
/// state with a lock and every call either applies completely or not at all.
///
/// The statistic returned by [`get`](Consumer::get) reflects *some* serialization of the
/// `consume` calls that completed before it, never a half-applied update.
pub trait Consumer<S>: Send + Sync {
    /// The statistic produced by [`get`](Consumer::get).
    type Output;

    /// Ingests one sample. Never fails.
    ///
    /// `aux_data` is whatever the producer attached to the sample; consumers
    /// that have no use for it drop it.
    fn consume(&self, sample: S, aux_data: AuxiliaryData);

    /// Snapshot of the statistic over all samples consumed so far.
    fn get(&self) -> Self::Output;

    /// Number of samples that contributed to [`get`](Consumer::get).
    fn n_samples(&self) -> SampleIndex;
}
