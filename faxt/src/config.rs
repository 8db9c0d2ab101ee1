//! Minimal `faxt` configuration: default color/verbosity behavior only,
//! loaded via `serde`/`toml` the way the teacher's config layer did, cut
//! down to what the single `run` subcommand actually has.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FaxtError, Result};

pub const CONFIG_FILE_NAME: &str = "faxt.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub no_color: bool,
}

impl Config {
    /// Looks for `faxt.toml` in the current directory; falls back to
    /// defaults if it isn't there.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FaxtError::Config(format!("could not read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| FaxtError::Config(format!("could not parse {}: {e}", path.display())))
    }
}
