//! Annotated call tree nodes.

use camino::{Utf8Path, Utf8PathBuf};
use lsp_types::Range;
use serde::{Deserialize, Serialize};

/// Marker stored on nodes whose expansion was cut short by cycle detection.
pub const CYCLE_REFERENCE: &str = "Already processed - cycle detected";

/// Traversal identity of a call hierarchy item.
///
/// The key is built from the file path and the 0-based start position of the
/// item's range, formatted as `{path}:{line}:{column}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey(String);

impl NodeKey {
    /// Creates a key from its components.
    #[must_use]
    pub fn new(path: &Utf8Path, line: u32, column: u32) -> Self {
        Self(format!("{path}:{line}:{column}"))
    }

    /// Returns the string representation of this key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 1-based inclusive line range of a node in its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLocation {
    /// File containing the symbol.
    pub file: Utf8PathBuf,
    /// First line of the symbol (1-based).
    pub start_line: u32,
    /// Last line of the symbol (1-based).
    pub end_line: u32,
}

impl CallLocation {
    /// Creates a location from 1-based line numbers.
    #[must_use]
    pub fn new(file: impl Into<Utf8PathBuf>, start_line: u32, end_line: u32) -> Self {
        Self {
            file: file.into(),
            start_line,
            end_line,
        }
    }

    /// Converts a 0-based LSP range into a 1-based location.
    #[must_use]
    pub fn from_range(file: impl Into<Utf8PathBuf>, range: &Range) -> Self {
        Self::new(
            file,
            range.start.line.saturating_add(1),
            range.end.line.saturating_add(1),
        )
    }
}

/// Line span inside a caller where a call occurs (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSite {
    /// First line of the call expression.
    pub start_line: u32,
    /// Last line of the call expression.
    pub end_line: u32,
}

impl CallSite {
    /// Converts a 0-based LSP range into a 1-based call site.
    #[must_use]
    pub const fn from_range(range: &Range) -> Self {
        Self {
            start_line: range.start.line.saturating_add(1),
            end_line: range.end.line.saturating_add(1),
        }
    }
}

/// Terminal state of a node after traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// In-scope node whose outgoing calls were fetched.
    Expanded,
    /// Out-of-scope node recorded without expansion.
    External,
    /// Revisited node; its calls are recorded elsewhere in the tree.
    CycleStub,
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde skip_serializing_if passes a reference"
)]
const fn is_false(value: &bool) -> bool {
    !*value
}

/// A node in the annotated call tree.
///
/// `source` and `class_annotations` are empty strings whenever the node is
/// external or could not be read; they are never absent.
/// `outgoing_calls` is `None` for external nodes and cycle stubs, and
/// `reference` is set only on cycle stubs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallNode {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    location: CallLocation,
    #[serde(default)]
    source: String,
    #[serde(default)]
    class_annotations: String,
    #[serde(default, skip_serializing_if = "is_false")]
    external: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    outgoing_calls: Option<Vec<CallNode>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    call_sites: Vec<CallSite>,
}

impl CallNode {
    /// Creates an in-scope node with no source and no outgoing calls.
    #[must_use]
    pub fn new(name: impl Into<String>, location: CallLocation) -> Self {
        Self {
            name: name.into(),
            detail: None,
            location,
            source: String::new(),
            class_annotations: String::new(),
            external: false,
            reference: None,
            outgoing_calls: Some(Vec::new()),
            call_sites: Vec::new(),
        }
    }

    /// Sets the owner identifier.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the extracted source text and class annotations.
    #[must_use]
    pub fn with_source(
        mut self,
        source: impl Into<String>,
        class_annotations: impl Into<String>,
    ) -> Self {
        self.source = source.into();
        self.class_annotations = class_annotations.into();
        self
    }

    /// Sets the call sites where the parent invokes this node.
    #[must_use]
    pub fn with_call_sites(mut self, call_sites: Vec<CallSite>) -> Self {
        self.call_sites = call_sites;
        self
    }

    /// Marks this node as external, clearing any source text.
    #[must_use]
    pub fn into_external(mut self) -> Self {
        self.external = true;
        self.source.clear();
        self.class_annotations.clear();
        self.outgoing_calls = None;
        self
    }

    /// Replaces the outgoing calls of this node.
    pub fn set_outgoing_calls(&mut self, calls: Vec<Self>) {
        self.outgoing_calls = Some(calls);
    }

    /// Appends an outgoing call.
    pub fn push_call(&mut self, call: Self) {
        self.outgoing_calls.get_or_insert_with(Vec::new).push(call);
    }

    /// Turns this node into a cycle stub. Source text is kept; outgoing calls
    /// are dropped.
    pub fn mark_cycle(&mut self) {
        self.reference = Some(CYCLE_REFERENCE.to_owned());
        self.outgoing_calls = None;
    }

    /// Returns the symbol display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owner identifier if the provider reported one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the node location.
    #[must_use]
    pub const fn location(&self) -> &CallLocation {
        &self.location
    }

    /// Returns the extracted source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the owning class's modifier and annotation block.
    #[must_use]
    pub fn class_annotations(&self) -> &str {
        &self.class_annotations
    }

    /// Returns whether the node lies outside the workspace boundary.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        self.external
    }

    /// Returns the cycle marker when this node is a stub.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Returns the outgoing calls in provider order.
    #[must_use]
    pub fn outgoing_calls(&self) -> &[Self] {
        self.outgoing_calls.as_deref().unwrap_or_default()
    }

    /// Returns whether an outgoing call list is recorded at all.
    #[must_use]
    pub const fn has_outgoing_calls(&self) -> bool {
        self.outgoing_calls.is_some()
    }

    /// Returns the call sites inside the parent.
    #[must_use]
    pub fn call_sites(&self) -> &[CallSite] {
        &self.call_sites
    }

    /// Returns the node's terminal traversal state.
    #[must_use]
    pub const fn state(&self) -> NodeState {
        if self.reference.is_some() {
            NodeState::CycleStub
        } else if self.external {
            NodeState::External
        } else {
            NodeState::Expanded
        }
    }

    /// Finds the first outgoing call with the given name.
    #[must_use]
    pub fn call_named(&self, name: &str) -> Option<&Self> {
        self.outgoing_calls().iter().find(|call| call.name == name)
    }
}
