pub mod auxiliary_data;
pub mod error;
pub mod running_mean;
pub mod sample;
pub mod types;

pub use auxiliary_data::AuxiliaryData;
pub use error::ConfigError;
pub use running_mean::RunningMean;
pub use sample::Sample;
pub use types::SampleIndex;
