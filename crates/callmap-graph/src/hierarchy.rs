//! Cycle-safe call hierarchy traversal.
//!
//! The builder walks outgoing calls depth-first from a root item. Every item
//! is identified by its file and range start; the first encounter expands it
//! and any later encounter produces a cycle stub. A stub still carries its
//! own source text; only its outgoing calls are omitted. Recursion stops at the
//! workspace boundary: external targets are recorded with their call sites
//! but never expanded. Collaborator failures degrade the affected node and
//! are reported through the [`ProgressSink`]; they never abort the walk.

use std::collections::HashSet;

use lsp_types::{
    CallHierarchyItem, CallHierarchyOutgoingCall, CallHierarchyOutgoingCallsParams,
    CallHierarchyPrepareParams, PartialResultParams, Position, TextDocumentIdentifier,
    TextDocumentPositionParams, WorkDoneProgressParams,
};
use tracing::{debug, info, instrument, trace, warn};

use crate::annotator::{DeclarationAnnotator, simple_class_name};
use crate::boundary::{BoundaryClassifier, Scope};
use crate::error::GraphError;
use crate::node::{CallLocation, CallNode, CallSite, NodeKey};
use crate::provider::{CallHierarchyClient, DocumentSource, ProgressSink, SourcePosition};
use crate::uri::{path_to_uri, uri_to_path};

/// Identities already expanded during one traversal.
///
/// A set is owned by a single [`HierarchyBuilder::build`] call and discarded
/// when it returns.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    keys: HashSet<NodeKey>,
}

impl VisitedSet {
    /// Records `key`, returning `false` when it was already present.
    pub fn insert(&mut self, key: NodeKey) -> bool {
        self.keys.insert(key)
    }

    /// Returns whether `key` has been visited.
    #[must_use]
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.keys.contains(key)
    }

    /// Returns the number of distinct identities visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether nothing has been visited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Result of a completed traversal.
#[derive(Debug, Clone)]
pub struct Traversal {
    root: CallNode,
    visited: VisitedSet,
}

impl Traversal {
    /// Returns the annotated root node.
    #[must_use]
    pub const fn root(&self) -> &CallNode {
        &self.root
    }

    /// Consumes the traversal, returning the root node.
    #[must_use]
    pub fn into_root(self) -> CallNode {
        self.root
    }

    /// Returns the number of distinct nodes expanded.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns the identities expanded during the traversal.
    #[must_use]
    pub const fn visited(&self) -> &VisitedSet {
        &self.visited
    }
}

enum Expansion {
    Calls(Vec<CallNode>),
    CycleStub,
}

/// Returns the traversal identity of an item: its file path and range start.
#[must_use]
pub fn node_key(item: &CallHierarchyItem) -> NodeKey {
    NodeKey::new(
        &uri_to_path(&item.uri),
        item.range.start.line,
        item.range.start.character,
    )
}

/// Builds annotated call trees from a call hierarchy client and a document
/// source.
#[derive(Debug)]
pub struct HierarchyBuilder<C, D> {
    client: C,
    documents: D,
    classifier: BoundaryClassifier,
    annotator: DeclarationAnnotator,
}

impl<C, D> HierarchyBuilder<C, D> {
    /// Creates a builder with the default annotation window.
    #[must_use]
    pub fn new(client: C, documents: D, classifier: BoundaryClassifier) -> Self {
        Self {
            client,
            documents,
            classifier,
            annotator: DeclarationAnnotator::default(),
        }
    }

    /// Replaces the declaration annotator.
    #[must_use]
    pub fn with_annotator(mut self, annotator: DeclarationAnnotator) -> Self {
        self.annotator = annotator;
        self
    }

    /// Returns the call hierarchy client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Returns the document source.
    #[must_use]
    pub const fn documents(&self) -> &D {
        &self.documents
    }

    /// Returns the boundary classifier.
    #[must_use]
    pub const fn classifier(&self) -> &BoundaryClassifier {
        &self.classifier
    }
}

impl<C: CallHierarchyClient, D: DocumentSource> HierarchyBuilder<C, D> {
    /// Resolves the first call hierarchy item at `position`.
    ///
    /// # Errors
    /// Returns [`GraphError::SymbolNotFound`] when the client reports no
    /// items, or the client's error when the request fails.
    pub fn prepare_root(
        &mut self,
        position: &SourcePosition,
    ) -> Result<CallHierarchyItem, GraphError> {
        let uri = path_to_uri(&position.path)?;
        let params = CallHierarchyPrepareParams {
            text_document_position_params: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri },
                position: Position::new(position.line, position.column),
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
        };

        self.client
            .prepare_call_hierarchy(params)?
            .and_then(|items| items.into_iter().next())
            .ok_or_else(|| {
                GraphError::symbol_not_found(position.path.clone(), position.line, position.column)
            })
    }

    /// Builds the annotated call tree rooted at `root`.
    ///
    /// The root is always expanded, whatever its scope.
    ///
    /// # Errors
    /// Returns [`GraphError::NoWorkspace`] when no workspace root is
    /// configured. Collaborator failures during the walk are not errors.
    #[instrument(level = "debug", skip_all, fields(root = %root.name))]
    pub fn build<P: ProgressSink + ?Sized>(
        &mut self,
        root: &CallHierarchyItem,
        progress: &mut P,
    ) -> Result<Traversal, GraphError> {
        if !self.classifier.has_workspace() {
            return Err(GraphError::NoWorkspace);
        }

        info!(root = %root.name, "building call hierarchy");
        let mut visited = VisitedSet::default();
        let mut node = self.annotate(root, progress);
        match self.expand(root, &mut visited, progress) {
            Expansion::Calls(calls) => node.set_outgoing_calls(calls),
            Expansion::CycleStub => node.mark_cycle(),
        }
        info!(visited = visited.len(), "call hierarchy built");

        Ok(Traversal {
            root: node,
            visited,
        })
    }

    fn expand<P: ProgressSink + ?Sized>(
        &mut self,
        item: &CallHierarchyItem,
        visited: &mut VisitedSet,
        progress: &mut P,
    ) -> Expansion {
        let key = node_key(item);
        if !visited.insert(key.clone()) {
            trace!(key = %key, "cycle detected");
            return Expansion::CycleStub;
        }
        debug!(key = %key, "expanding node");

        let outgoing = self.fetch_outgoing(item, progress);
        let mut calls = Vec::with_capacity(outgoing.len());
        for call in outgoing {
            let call_sites = call.from_ranges.iter().map(CallSite::from_range).collect();
            let mut child = self.annotate(&call.to, progress).with_call_sites(call_sites);
            if !child.is_external() {
                match self.expand(&call.to, visited, progress) {
                    Expansion::Calls(grandchildren) => child.set_outgoing_calls(grandchildren),
                    Expansion::CycleStub => child.mark_cycle(),
                }
            }
            calls.push(child);
        }
        Expansion::Calls(calls)
    }

    fn fetch_outgoing<P: ProgressSink + ?Sized>(
        &mut self,
        item: &CallHierarchyItem,
        progress: &mut P,
    ) -> Vec<CallHierarchyOutgoingCall> {
        let params = CallHierarchyOutgoingCallsParams {
            item: item.clone(),
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        };

        match self.client.outgoing_calls(params) {
            Ok(calls) => calls.unwrap_or_default(),
            Err(error) => {
                warn!(item = %item.name, %error, "outgoing call lookup failed");
                progress.error(&format!(
                    "Failed to fetch outgoing calls for {}: {error}",
                    item.name
                ));
                Vec::new()
            }
        }
    }

    fn annotate<P: ProgressSink + ?Sized>(
        &mut self,
        item: &CallHierarchyItem,
        progress: &mut P,
    ) -> CallNode {
        let path = uri_to_path(&item.uri);
        let scope = self.classifier.classify(&path, item.detail.as_deref());
        let mut node = CallNode::new(item.name.clone(), CallLocation::from_range(path, &item.range));
        if let Some(detail) = &item.detail {
            node = node.with_detail(detail.clone());
        }

        if scope == Scope::External {
            return node.into_external();
        }

        match self.read_node_text(item) {
            Ok((source, annotations)) => node.with_source(source, annotations),
            Err(error) => {
                warn!(item = %item.name, %error, "degrading node without source");
                progress.error(&format!("Failed to read source for {}: {error}", item.name));
                node
            }
        }
    }

    fn read_node_text(&mut self, item: &CallHierarchyItem) -> Result<(String, String), GraphError> {
        let class_name = simple_class_name(item.detail.as_deref().unwrap_or_default());
        let class_info = self
            .annotator
            .class_info(&mut self.documents, &item.uri, class_name)?;
        let source =
            self.documents
                .read_lines(&item.uri, item.range.start.line, item.range.end.line)?;
        Ok((source, class_info.annotations))
    }
}
