use crate::config::build::BuildError;
use crate::config::choices::ConsumerChoice;
use std::fs;
use std::path::Path;

/// Parses a consumer choice, e.g.
/// `{"type": "histogram", "params": {"min_value": 0, "max_value": 1}}`.
pub fn load_choice(json: &str) -> Result<ConsumerChoice, BuildError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_choice_from_path<P: AsRef<Path>>(path: P) -> Result<ConsumerChoice, BuildError> {
    let text = fs::read_to_string(path)?;
    load_choice(&text)
}
