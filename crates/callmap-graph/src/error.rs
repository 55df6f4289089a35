//! Error types for call hierarchy traversal and prompt rendering.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned by call hierarchy operations.
///
/// Structural failures ([`Self::SymbolNotFound`], [`Self::NoWorkspace`],
/// [`Self::NoSources`], [`Self::EmptyDiagram`]) abort the requested
/// operation. Collaborator failures raised while a traversal is in progress
/// are logged and degrade only the affected node.
#[derive(Debug, Error)]
pub enum GraphError {
    /// No call hierarchy item could be resolved at the requested position.
    #[error("could not prepare a call hierarchy item at {path}:{line}:{column}")]
    SymbolNotFound {
        /// Path to the file containing the position.
        path: Utf8PathBuf,
        /// Line number (0-based).
        line: u32,
        /// Column number (0-based).
        column: u32,
    },

    /// The traversal was requested without any workspace roots.
    #[error("no workspace folder found")]
    NoWorkspace,

    /// The call tree carried no source text to build a prompt from.
    #[error("no source code found to generate diagram")]
    NoSources,

    /// A session operation needed a call tree before one was traced.
    #[error("no call hierarchy has been traced yet")]
    NoHierarchy,

    /// Diagram markup handed to the cleanup pass was blank.
    #[error("diagram markup is empty")]
    EmptyDiagram,

    /// A class lookup was attempted with the reserved owner fragment.
    #[error("invalid class name: {0}")]
    ReservedClassName(String),

    /// An external collaborator (symbol provider, call hierarchy client)
    /// reported a failure.
    #[error("collaborator failure: {0}")]
    Collaborator(String),

    /// Input handed to the crate was rejected.
    #[error("validation error: {0}")]
    Validation(String),

    /// A text pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// An IO error occurred while reading documents or converting paths.
    #[error("IO error: {message}")]
    Io {
        /// Description of the IO error.
        message: String,
        /// Underlying error wrapped in Arc for Clone support.
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl GraphError {
    /// Creates a new `SymbolNotFound` error.
    #[must_use]
    pub fn symbol_not_found(path: impl Into<Utf8PathBuf>, line: u32, column: u32) -> Self {
        Self::SymbolNotFound {
            path: path.into(),
            line,
            column,
        }
    }

    /// Creates a new `ReservedClassName` error.
    #[must_use]
    pub fn reserved_class_name(name: impl Into<String>) -> Self {
        Self::ReservedClassName(name.into())
    }

    /// Creates a new `Collaborator` error.
    #[must_use]
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator(message.into())
    }

    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a new `Io` error.
    #[must_use]
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }
}
