//! CLI error types

use sig_graph::GraphError;
use sig_types::{SystemId, TypesError};
use std::path::PathBuf;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Page file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file is not valid TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration values out of range
    #[error("configuration error: {0}")]
    Config(#[from] TypesError),

    /// Relation refers to an inter index outside its system
    #[error("{system}: relation {relation} refers to missing inter #{index}")]
    MissingInter {
        system: SystemId,
        relation: usize,
        index: usize,
    },

    /// Page content rejected by the graph
    #[error("{system}: {error}")]
    Graph { system: SystemId, error: GraphError },
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
