//! File-backed document access.

use std::fs;

use lsp_types::{DocumentSymbolResponse, Uri};

use crate::error::GraphError;
use crate::provider::{DocumentSource, SymbolProvider};
use crate::uri::uri_to_path;

/// Returns lines `start_line..=end_line` (0-based) of `text`, joined by `\n`.
///
/// Lines beyond the end of `text` are ignored; an inverted range yields an
/// empty string.
#[must_use]
pub fn slice_lines(text: &str, start_line: u32, end_line: u32) -> String {
    if end_line < start_line {
        return String::new();
    }
    let skip = usize::try_from(start_line).unwrap_or(usize::MAX);
    let take = usize::try_from(end_line - start_line)
        .unwrap_or(usize::MAX)
        .saturating_add(1);
    text.lines().skip(skip).take(take).collect::<Vec<_>>().join("\n")
}

/// [`DocumentSource`] that reads text from disk and delegates symbol lookup.
#[derive(Debug, Clone)]
pub struct FsDocumentSource<P> {
    symbols: P,
}

impl<P> FsDocumentSource<P> {
    /// Wraps a symbol provider.
    #[must_use]
    pub const fn new(symbols: P) -> Self {
        Self { symbols }
    }

    /// Returns the wrapped symbol provider.
    #[must_use]
    pub const fn symbols(&self) -> &P {
        &self.symbols
    }
}

impl<P: SymbolProvider> SymbolProvider for FsDocumentSource<P> {
    fn document_symbols(&mut self, uri: &Uri) -> Result<Option<DocumentSymbolResponse>, GraphError> {
        self.symbols.document_symbols(uri)
    }
}

impl<P: SymbolProvider> DocumentSource for FsDocumentSource<P> {
    fn read_lines(
        &mut self,
        uri: &Uri,
        start_line: u32,
        end_line: u32,
    ) -> Result<String, GraphError> {
        let path = uri_to_path(uri);
        let text = fs::read_to_string(path.as_std_path())
            .map_err(|source| GraphError::io(format!("failed to read {path}"), source))?;
        Ok(slice_lines(&text, start_line, end_line))
    }
}
