//! Call hierarchy traversal and diagram prompt generation.
//!
//! This crate turns a single entry point into an annotated, cycle-safe call
//! tree and renders that tree into prompt text for diagram generation.
//!
//! # Traversal
//!
//! [`HierarchyBuilder`] walks outgoing calls through a [`CallHierarchyClient`]
//! and reads source text through a [`DocumentSource`]. Each item is expanded
//! at most once per traversal; later encounters become cycle stubs. A
//! [`BoundaryClassifier`] marks nodes outside the workspace, or owned by
//! third-party packages, as external; those are recorded but never expanded.
//! The [`DeclarationAnnotator`] attaches the owning class's annotation block
//! to every in-scope node.
//!
//! # Rendering
//!
//! - [`collect_sources`] flattens a tree into [`SourceRecord`]s.
//! - [`build_prompt`] renders records into a delimited prompt.
//! - [`add_links`] inserts `click` directives into diagram markup.
//! - [`cleanup_diagram`] normalises generated markup before adding links.
//!
//! # Example
//!
//! ```ignore
//! use callmap_graph::{BoundaryClassifier, CallMapSession, HierarchyBuilder, SourcePosition, TracingProgress};
//!
//! let builder = HierarchyBuilder::new(client, documents, BoundaryClassifier::with_default_markers(["/ws"]));
//! let mut session = CallMapSession::new(builder);
//! let mut progress = TracingProgress;
//!
//! session.trace(&SourcePosition::new("/ws/src/App.java", 12, 8), &mut progress)?;
//! let prompt = session.prompt("sequence", &mut progress)?;
//! ```

mod annotator;
mod boundary;
mod cleanup;
mod collector;
mod documents;
mod error;
mod hierarchy;
mod ident;
mod links;
mod node;
mod prompt;
mod provider;
mod session;
mod uri;

pub use annotator::{
    AnnotationWindow, ClassInfo, DeclarationAnnotator, RESERVED_CLASS_NAME,
    extract_declaration_block, simple_class_name,
};
pub use boundary::{BoundaryClassifier, Scope};
pub use cleanup::{cleanup_diagram, quote_labels};
pub use collector::{SourceRecord, UNKNOWN_CLASS, UNKNOWN_METHOD, collect_sources};
pub use documents::{FsDocumentSource, slice_lines};
pub use error::GraphError;
pub use hierarchy::{HierarchyBuilder, Traversal, VisitedSet, node_key};
pub use ident::{UNKNOWN_ID, class_abbreviation, make_id, method_name};
pub use links::{LinkDefinition, add_links, insert_link_directives, link_definitions};
pub use node::{CYCLE_REFERENCE, CallLocation, CallNode, CallSite, NodeKey, NodeState};
pub use prompt::{DiagramKind, PROMPT_DELIMITER, build_prompt, render_prompt};
pub use provider::{
    CallHierarchyClient, DocumentSource, NullProgress, ProgressSink, SourcePosition,
    SymbolProvider, TracingProgress,
};
pub use session::CallMapSession;
pub use uri::{FILE_LINK_PREFIX, absolute_path, base_filename, file_link, path_to_uri, uri_to_path};

#[cfg(test)]
mod tests;
