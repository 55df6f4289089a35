//! Shared fakes for call hierarchy test cases.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use lsp_types::{
    CallHierarchyItem, CallHierarchyOutgoingCall, CallHierarchyOutgoingCallsParams,
    CallHierarchyPrepareParams, DocumentSymbol, DocumentSymbolResponse, Position, Range,
    SymbolKind, Uri,
};

use crate::{
    BoundaryClassifier, CallHierarchyClient, DocumentSource, GraphError, HierarchyBuilder,
    ProgressSink, SymbolProvider, slice_lines,
};

pub(super) const WORKSPACE: &str = "/ws";

#[derive(Clone, Debug)]
pub(super) enum Response<T: Clone> {
    Ok(Option<Vec<T>>),
    Err,
}

impl<T: Clone> Default for Response<T> {
    fn default() -> Self {
        Self::Ok(None)
    }
}

impl<T: Clone> Response<T> {
    pub(super) fn as_result(&self) -> Result<Option<Vec<T>>, GraphError> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Err => Err(GraphError::validation("test failure")),
        }
    }
}

/// Call hierarchy client backed by a table of outgoing calls keyed by item
/// name. Every outgoing-call request is recorded.
#[derive(Clone, Debug, Default)]
pub(super) struct FakeClient {
    pub(super) prepare: Response<CallHierarchyItem>,
    outgoing: HashMap<String, Response<CallHierarchyOutgoingCall>>,
    pub(super) requests: Vec<String>,
}

impl FakeClient {
    pub(super) fn rooted_at(root: CallHierarchyItem) -> Self {
        Self {
            prepare: Response::Ok(Some(vec![root])),
            ..Self::default()
        }
    }

    pub(super) fn with_calls(
        mut self,
        from: &str,
        calls: impl IntoIterator<Item = CallHierarchyItem>,
    ) -> Self {
        let calls = calls.into_iter().map(call_to).collect();
        self.outgoing
            .insert(from.to_owned(), Response::Ok(Some(calls)));
        self
    }

    pub(super) fn failing_for(mut self, from: &str) -> Self {
        self.outgoing.insert(from.to_owned(), Response::Err);
        self
    }

    pub(super) fn requested(&self, name: &str) -> bool {
        self.requests.iter().any(|request| request == name)
    }
}

impl CallHierarchyClient for FakeClient {
    fn prepare_call_hierarchy(
        &mut self,
        _params: CallHierarchyPrepareParams,
    ) -> Result<Option<Vec<CallHierarchyItem>>, GraphError> {
        self.prepare.as_result()
    }

    fn outgoing_calls(
        &mut self,
        params: CallHierarchyOutgoingCallsParams,
    ) -> Result<Option<Vec<CallHierarchyOutgoingCall>>, GraphError> {
        let name = params.item.name;
        let response = self.outgoing.get(&name).cloned().unwrap_or_default();
        self.requests.push(name);
        response.as_result()
    }
}

/// In-memory documents keyed by URI string.
#[derive(Clone, Debug, Default)]
pub(super) struct FakeDocuments {
    texts: HashMap<String, String>,
    symbols: HashMap<String, DocumentSymbolResponse>,
    failing_symbols: HashSet<String>,
}

impl FakeDocuments {
    /// Adds a Java class with one method, laid out as `java_class` describes.
    pub(super) fn with_class(mut self, path: &str, class: &str, method: &str) -> Self {
        let key = uri(path).as_str().to_owned();
        self.texts.insert(key.clone(), java_class(class, method));
        self.symbols.insert(
            key,
            DocumentSymbolResponse::Nested(vec![class_symbol(class)]),
        );
        self
    }

    /// Adds raw text with no symbols.
    pub(super) fn with_text(mut self, path: &str, text: &str) -> Self {
        self.texts.insert(uri(path).as_str().to_owned(), text.to_owned());
        self
    }

    pub(super) fn failing_symbols_for(mut self, path: &str) -> Self {
        self.failing_symbols.insert(uri(path).as_str().to_owned());
        self
    }
}

impl SymbolProvider for FakeDocuments {
    fn document_symbols(&mut self, uri: &Uri) -> Result<Option<DocumentSymbolResponse>, GraphError> {
        if self.failing_symbols.contains(uri.as_str()) {
            return Err(GraphError::collaborator("symbol provider crashed"));
        }
        Ok(self.symbols.get(uri.as_str()).cloned())
    }
}

impl DocumentSource for FakeDocuments {
    fn read_lines(
        &mut self,
        uri: &Uri,
        start_line: u32,
        end_line: u32,
    ) -> Result<String, GraphError> {
        self.texts
            .get(uri.as_str())
            .map(|text| slice_lines(text, start_line, end_line))
            .ok_or_else(|| GraphError::collaborator(format!("cannot open {}", uri.as_str())))
    }
}

/// Progress sink that keeps every message.
#[derive(Debug, Default)]
pub(super) struct RecordingProgress {
    pub(super) messages: Vec<String>,
    pub(super) errors: Vec<String>,
}

impl ProgressSink for RecordingProgress {
    fn progress(&mut self, message: &str) {
        self.messages.push(message.to_owned());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }
}

pub(super) fn builder(
    client: FakeClient,
    documents: FakeDocuments,
) -> HierarchyBuilder<FakeClient, FakeDocuments> {
    HierarchyBuilder::new(
        client,
        documents,
        BoundaryClassifier::with_default_markers([WORKSPACE]),
    )
}

pub(super) fn uri(path: &str) -> Uri {
    Uri::from_str(&format!("file://{path}")).expect("valid URI")
}

pub(super) fn range(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Range {
    Range {
        start: Position::new(start_line, start_column),
        end: Position::new(end_line, end_column),
    }
}

/// Source of a class whose declaration sits on line 3 and whose single
/// method spans lines 4 to 6 (0-based).
pub(super) fn java_class(class: &str, method: &str) -> String {
    format!(
        "package com.acme;\n\
         \n\
         @Service\n\
         public class {class} {{\n\
         \x20   void {method}() {{\n\
         \x20       next();\n\
         \x20   }}\n\
         }}\n"
    )
}

#[expect(deprecated, reason = "DocumentSymbol still requires the deprecated field")]
fn class_symbol(class: &str) -> DocumentSymbol {
    DocumentSymbol {
        name: class.to_owned(),
        detail: None,
        kind: SymbolKind::CLASS,
        tags: None,
        deprecated: None,
        range: range(3, 0, 7, 1),
        selection_range: range(3, 13, 3, 13),
        children: None,
    }
}

/// Item for the method declared by [`java_class`] in `path`.
pub(super) fn method_item(path: &str, class: &str, method: &str) -> CallHierarchyItem {
    item(method, Some(&format!("com.acme.{class}")), path, range(4, 4, 6, 5))
}

pub(super) fn item(
    name: &str,
    detail: Option<&str>,
    path: &str,
    span: Range,
) -> CallHierarchyItem {
    CallHierarchyItem {
        name: name.to_owned(),
        kind: SymbolKind::METHOD,
        tags: None,
        detail: detail.map(str::to_owned),
        uri: uri(path),
        range: span,
        selection_range: span,
        data: None,
    }
}

pub(super) fn call_to(to: CallHierarchyItem) -> CallHierarchyOutgoingCall {
    CallHierarchyOutgoingCall {
        to,
        from_ranges: vec![range(5, 8, 5, 14)],
    }
}
