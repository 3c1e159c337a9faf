//! Optional TOML configuration.
//!
//! ```toml
//! json_indent = 4
//!
//! [sources]
//! cors = "corsModules.json"
//! lesson_types = "reference/lessonTypes.json"
//! ```
//!
//! Every key is optional; absent keys keep their defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use acadmod_ingest::SourceLayout;

pub const DEFAULT_JSON_INDENT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Source file names per category and the lesson type table path.
    pub sources: SourceLayout,
    /// Indentation of written JSON; `0` writes compact JSON.
    pub json_indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourceLayout::default(),
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse configuration")
    }

    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read configuration {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("load {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let config = Config::from_toml("[sources]\ncors = \"corsModules.json\"\n").unwrap();
        assert_eq!(config.json_indent, DEFAULT_JSON_INDENT);
        assert_eq!(config.sources.cors, "corsModules.json");
        assert_eq!(config.sources.ivle, "ivle.json");
        assert_eq!(config.sources.lesson_types, "lessonTypes.json");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml("indent = 3\n").is_err());
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
