//! Error type for the command line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        source: mtc_json::JsonError,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: mtc_json::JsonError,
    },

    #[error("{count} observation(s) dropped while decoding")]
    Dropped { count: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Json(#[from] mtc_json::JsonError),
}

pub type CliResult<T> = Result<T, CliError>;
