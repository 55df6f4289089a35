//! CLI argument definitions for the callmap tool.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Command-line interface for rendering prompts and diagrams from a call tree.
#[derive(Parser, Debug)]
#[command(name = "callmap", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Operations over a serialised call tree.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Prints the diagram-generation prompt for a call tree.
    Prompt {
        /// JSON file holding the call tree.
        #[arg(long, value_name = "FILE")]
        tree: Utf8PathBuf,
        /// Diagram kind (`sequence`, `flowchart`, `flowchart-links`, or any
        /// other label for a bare prompt). Defaults to the configured kind.
        #[arg(long, value_name = "KIND")]
        kind: Option<String>,
    },
    /// Prints a diagram with clickable source links appended.
    Links {
        /// JSON file holding the call tree.
        #[arg(long, value_name = "FILE")]
        tree: Utf8PathBuf,
        /// Mermaid diagram to augment.
        #[arg(long, value_name = "FILE")]
        diagram: Utf8PathBuf,
    },
    /// Prints a cleaned, link-augmented diagram.
    Cleanup {
        /// JSON file holding the call tree.
        #[arg(long, value_name = "FILE")]
        tree: Utf8PathBuf,
        /// Mermaid diagram to clean.
        #[arg(long, value_name = "FILE")]
        diagram: Utf8PathBuf,
    },
    /// Prints the flattened source records of a call tree as JSON.
    Records {
        /// JSON file holding the call tree.
        #[arg(long, value_name = "FILE")]
        tree: Utf8PathBuf,
    },
}
