// src/error.rs
use thiserror::Error;
use std::io;

use crate::tree::Key;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Key {0} already exists")]
    DuplicateKey(Key),

    #[error("Key {0} not found")]
    KeyNotFound(Key),

    #[error("Invariant violated at key {key}: {reason}")]
    InvariantViolation {
        key: Key,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
