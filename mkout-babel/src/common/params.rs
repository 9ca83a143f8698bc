//! Per-call format parameters (`--extra-<key> <value>` on the command line).

use crate::error::FormatError;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// String parameters with keys normalized to `snake_case`.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: BTreeMap<String, String>,
}

impl Params {
    pub fn new(raw: &HashMap<String, String>) -> Self {
        let entries = raw
            .iter()
            .map(|(key, value)| (key.replace('-', "_"), value.clone()))
            .collect();
        Params { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    /// Note a key no option recognized.
    pub fn ignore(&self, key: &str) {
        warn!(key, "ignoring unrecognized format parameter");
    }
}

pub fn parse_bool(key: &str, raw: &str) -> Result<bool, FormatError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::SerializationError(format!(
            "Invalid boolean value '{other}' for parameter '{key}'"
        ))),
    }
}

pub fn parse_usize(key: &str, raw: &str) -> Result<usize, FormatError> {
    raw.trim().parse().map_err(|_| {
        FormatError::SerializationError(format!(
            "Invalid number '{raw}' for parameter '{key}'"
        ))
    })
}
