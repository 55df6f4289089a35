//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use callmap_graph::GraphError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {path}: {source}")]
    ReadInput { path: Utf8PathBuf, source: io::Error },
    #[error("failed to parse call tree {path}: {source}")]
    ParseTree {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialise source records: {0}")]
    SerialiseRecords(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
    #[error(transparent)]
    Graph(#[from] GraphError),
}
