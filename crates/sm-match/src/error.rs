use std::path::PathBuf;

use sm_common::embedding::ModelLoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Model(#[from] ModelLoadError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}
