use std::path::PathBuf;

use thiserror::Error;

use crate::generator::error::GenerationError;
use crate::graph::error::GraphError;

/// Anything that can stop a CLI command.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
