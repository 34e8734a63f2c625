// --- File: error.rs ---
// Error types for configuration loading and time-series export.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems detected while loading or validating a simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("species table is empty")]
    NoSpecies,
    #[error("species `{0}` is declared more than once")]
    DuplicateSpecies(String),
    #[error("species `{predator}` preys on unknown species `{prey}`")]
    UnknownPrey { predator: String, prey: String },
    #[error("species `{species}`: {field} = {value} is outside [0, 1]")]
    ProbabilityOutOfRange {
        species: String,
        field: &'static str,
        value: f32,
    },
    #[error("species `{species}`: {field} must be positive and finite (got {value})")]
    NonPositive {
        species: String,
        field: &'static str,
        value: f32,
    },
    #[error("species `{species}`: radius {radius} does not fit inside arena half-width {half_width}")]
    ArenaTooSmall {
        species: String,
        radius: f32,
        half_width: f32,
    },
    #[error("arena: {0}")]
    InvalidArena(&'static str),
}

/// Failures while writing the terminal time-series tables.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
// --- End of File: error.rs ---
