//! Tree dumps for the `inspect` command
//!
//! Each view renders the parsed tree in a structural format so the shape the
//! renderers see can be checked without going through a round trip.
//!
//! - `yaml`: compact YAML, one entry per node (default)
//! - `yaml-full`: YAML with every node attribute under `properties`
//! - `json`: the serde form of the tree, loadable again with `--from json`
//!
//! `--extra-<key>` parameters are forwarded to the underlying format.

use mkout_babel::formats::{JsonFormat, JsonOptions, YamlFormat, YamlOptions};
use mkout_babel::{Format, FormatError, Tree};
use mkout_config::MkoutConfig;
use std::collections::HashMap;

pub const AVAILABLE_VIEWS: &[&str] = &["yaml", "yaml-full", "json"];

pub const DEFAULT_VIEW: &str = "yaml";

pub fn execute_view(
    tree: &Tree,
    view: &str,
    config: &MkoutConfig,
    params: &HashMap<String, String>,
) -> Result<String, FormatError> {
    match view {
        "yaml" | "yaml-full" => {
            let mut options = YamlOptions::from(config.yaml.clone());
            if view == "yaml-full" {
                options.compact = false;
            }
            YamlFormat::new(options).serialize_with_options(tree, params)
        }
        "json" => JsonFormat::new(JsonOptions::from(config.json.clone()))
            .serialize_with_options(tree, params),
        other => Err(FormatError::FormatNotFound(other.to_string())),
    }
}
