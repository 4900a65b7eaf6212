mod consumers;
mod error;
mod loader;

pub use error::BuildError;

pub use consumers::{BuiltConsumer, build_consumer};
pub use loader::{load_choice, load_choice_from_path};
