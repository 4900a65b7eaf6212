mod choice;
mod consumer_choice;

pub use choice::Choice;
pub use consumer_choice::*;
