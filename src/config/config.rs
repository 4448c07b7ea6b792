use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::TreeResult;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Number of arena slots reserved up front.
    pub initial_capacity: usize,
    /// Run a full invariant check after every successful insert or delete.
    pub check_invariants: bool,
    pub log_level: String,
}

impl Config {
    pub fn new() -> Self {
        Config {
            initial_capacity: 16,
            check_invariants: false,
            log_level: "info".to_string(),
        }
    }

    pub fn from_toml_str(source: &str) -> TreeResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> TreeResult<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
