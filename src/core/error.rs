//! Error types for reference data, saves, character creation and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or validate reference data. Fatal at startup.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {table} table: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid modifier entry '{0}' (expected STAT:VALUE)")]
    Modifier(String),

    #[error("reference data has no areas")]
    NoAreas,

    #[error("{table} record {id} has minLevel {min} above maxLevel {max}")]
    LevelRange {
        table: &'static str,
        id: String,
        min: u32,
        max: u32,
    },
}

/// Failure to write a save.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not determine a save directory")]
    NoSaveDir,
}

/// Rejected character-creation intake. Nothing is committed when this is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreationError {
    #[error("character name must not be empty")]
    EmptyName,

    #[error("gender must not be empty")]
    EmptyGender,

    #[error("unknown race '{0}'")]
    UnknownRace(String),

    #[error("selected class '{0}' is invalid")]
    UnknownClass(String),

    #[error("a {race} cannot be a {class}")]
    RestrictedCombination { race: String, class: String },
}

/// Failure to read, parse or validate the game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("configuration validation error: {0}")]
    Validation(String),
}
