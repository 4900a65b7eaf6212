pub mod build;
pub mod choices;

pub use build::{BuildError, BuiltConsumer, build_consumer, load_choice, load_choice_from_path};
pub use choices::{
    AutocovarianceParameters, Choice, ConsumerChoice, ConsumerKind, HistogramParameters,
    MeanParameters,
};
