//! Collaborator seams used by the traversal.
//!
//! The traversal never talks to an editor or language server directly. It is
//! driven through these traits so tests and hosts can inject their own
//! implementations: a [`CallHierarchyClient`] for call hierarchy requests, a
//! [`DocumentSource`] for document symbols and raw text, and a
//! [`ProgressSink`] for fire-and-forget diagnostics.

use camino::Utf8PathBuf;
use lsp_types::{
    CallHierarchyItem, CallHierarchyOutgoingCall, CallHierarchyOutgoingCallsParams,
    CallHierarchyPrepareParams, DocumentSymbolResponse, Uri,
};

use crate::error::GraphError;

/// A position in a source file for initiating call hierarchy queries.
#[derive(Debug, Clone)]
pub struct SourcePosition {
    /// Path to the source file.
    pub path: Utf8PathBuf,
    /// Line number (0-based).
    pub line: u32,
    /// Column number (0-based).
    pub column: u32,
}

impl SourcePosition {
    /// Creates a new source position.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }
}

/// Client abstraction for LSP call hierarchy operations.
pub trait CallHierarchyClient {
    /// Prepares call hierarchy items at the given position.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    fn prepare_call_hierarchy(
        &mut self,
        params: CallHierarchyPrepareParams,
    ) -> Result<Option<Vec<CallHierarchyItem>>, GraphError>;

    /// Gets outgoing calls for the given item, in provider order.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    fn outgoing_calls(
        &mut self,
        params: CallHierarchyOutgoingCallsParams,
    ) -> Result<Option<Vec<CallHierarchyOutgoingCall>>, GraphError>;
}

/// Source of document symbols.
pub trait SymbolProvider {
    /// Returns the symbols declared in the document, or `None` when the
    /// provider has nothing for it.
    ///
    /// # Errors
    /// Returns an error if the provider fails.
    fn document_symbols(&mut self, uri: &Uri) -> Result<Option<DocumentSymbolResponse>, GraphError>;
}

/// Document access used to annotate in-scope nodes.
pub trait DocumentSource: SymbolProvider {
    /// Returns the full text of lines `start_line..=end_line` (0-based),
    /// joined by `\n`. Lines past the end of the document are ignored.
    ///
    /// # Errors
    /// Returns an error if the document cannot be opened.
    fn read_lines(&mut self, uri: &Uri, start_line: u32, end_line: u32)
    -> Result<String, GraphError>;
}

/// Fire-and-forget diagnostic sink.
///
/// Implementations must not fail; the traversal ignores their outcome.
pub trait ProgressSink {
    /// Reports a progress message.
    fn progress(&mut self, message: &str);

    /// Reports a degraded or failed step.
    fn error(&mut self, message: &str);
}

/// Sink that discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn progress(&mut self, _message: &str) {}

    fn error(&mut self, _message: &str) {}
}

/// Sink that forwards messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn progress(&mut self, message: &str) {
        tracing::info!(target: "callmap::progress", "{message}");
    }

    fn error(&mut self, message: &str) {
        tracing::error!(target: "callmap::progress", "{message}");
    }
}

impl<T: ProgressSink + ?Sized> ProgressSink for &mut T {
    fn progress(&mut self, message: &str) {
        (**self).progress(message);
    }

    fn error(&mut self, message: &str) {
        (**self).error(message);
    }
}
