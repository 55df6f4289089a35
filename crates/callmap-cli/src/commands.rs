//! Command execution over a serialised call tree.

use std::fs;
use std::io::Write;

use camino::Utf8Path;
use callmap_config::Config;
use callmap_graph::{
    CallNode, SourceRecord, TracingProgress, add_links, cleanup_diagram, collect_sources,
    render_prompt,
};
use tracing::debug;

use crate::cli::CliCommand;
use crate::errors::AppError;

/// Runs `command` and writes its rendered output to `stdout`.
pub(crate) fn execute<W: Write>(
    command: CliCommand,
    config: &Config,
    stdout: &mut W,
) -> Result<(), AppError> {
    let mut progress = TracingProgress;
    let output = match command {
        CliCommand::Prompt { tree, kind } => {
            let diagram_kind = kind.as_deref().unwrap_or_else(|| config.diagram_kind());
            render_prompt(&read_tree(&tree)?, diagram_kind, &mut progress)?
        }
        CliCommand::Links { tree, diagram } => {
            let records = read_records(&tree)?;
            add_links(&read_input(&diagram)?, &records, &mut progress)
        }
        CliCommand::Cleanup { tree, diagram } => {
            let records = read_records(&tree)?;
            cleanup_diagram(&read_input(&diagram)?, &records, &mut progress)?
        }
        CliCommand::Records { tree } => serde_json::to_string_pretty(&read_records(&tree)?)
            .map_err(AppError::SerialiseRecords)?,
    };

    emit(stdout, &output)
}

fn read_input(path: &Utf8Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

fn read_tree(path: &Utf8Path) -> Result<CallNode, AppError> {
    let text = read_input(path)?;
    let root: CallNode = serde_json::from_str(&text).map_err(|source| AppError::ParseTree {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(%path, root = root.name(), "loaded call tree");
    Ok(root)
}

fn read_records(path: &Utf8Path) -> Result<Vec<SourceRecord>, AppError> {
    read_tree(path).map(|root| collect_sources(&root))
}

fn emit<W: Write>(stdout: &mut W, output: &str) -> Result<(), AppError> {
    stdout
        .write_all(output.as_bytes())
        .map_err(AppError::WriteOutput)?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n").map_err(AppError::WriteOutput)?;
    }
    stdout.flush().map_err(AppError::WriteOutput)
}
