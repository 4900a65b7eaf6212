use crate::config::build::BuildError;
use crate::config::choices::{ConsumerChoice, ConsumerKind};
use crate::consumers::{Histogram, MeanValue, SpuriousAutocovariance};
use log::debug;

mod histogram;
mod mean_value;
mod spurious_autocovariance;

/// Accumulator produced from a [`ConsumerChoice`].
///
/// Mean and autocovariance take vector samples, the histogram takes scalars.
pub enum BuiltConsumer {
    MeanValue(MeanValue<Vec<f64>>),
    Histogram(Histogram<f64>),
    SpuriousAutocovariance(SpuriousAutocovariance<Vec<f64>>),
}

impl BuiltConsumer {
    pub fn kind(&self) -> ConsumerKind {
        match self {
            BuiltConsumer::MeanValue(_) => ConsumerKind::MeanValue,
            BuiltConsumer::Histogram(_) => ConsumerKind::Histogram,
            BuiltConsumer::SpuriousAutocovariance(_) => ConsumerKind::SpuriousAutocovariance,
        }
    }
}

pub fn build_consumer(choice: ConsumerChoice) -> Result<BuiltConsumer, BuildError> {
    debug!("building consumer from {choice:?}");
    match choice {
        ConsumerChoice::MeanValue(p) => {
            let c = MeanValue::try_from(p)?;
            Ok(BuiltConsumer::MeanValue(c))
        }
        ConsumerChoice::Histogram(p) => {
            let c = Histogram::try_from(p)?;
            Ok(BuiltConsumer::Histogram(c))
        }
        ConsumerChoice::SpuriousAutocovariance(p) => {
            let c = SpuriousAutocovariance::try_from(p)?;
            Ok(BuiltConsumer::SpuriousAutocovariance(c))
        }
    }
}
