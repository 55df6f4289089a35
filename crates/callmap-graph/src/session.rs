//! Per-session ownership of a traced call tree.
//!
//! A session traces one root and keeps the resulting tree so later prompt and
//! link requests reuse it instead of walking the hierarchy again.

use tracing::{info, instrument};

use crate::cleanup::cleanup_diagram;
use crate::collector::collect_sources;
use crate::error::GraphError;
use crate::hierarchy::{HierarchyBuilder, Traversal};
use crate::links::add_links;
use crate::node::CallNode;
use crate::prompt::render_prompt;
use crate::provider::{CallHierarchyClient, DocumentSource, ProgressSink, SourcePosition};

/// Holds the call tree traced for one root request.
#[derive(Debug)]
pub struct CallMapSession<C, D> {
    builder: HierarchyBuilder<C, D>,
    hierarchy: Option<CallNode>,
}

impl<C, D> CallMapSession<C, D> {
    /// Creates a session with no traced hierarchy.
    #[must_use]
    pub const fn new(builder: HierarchyBuilder<C, D>) -> Self {
        Self {
            builder,
            hierarchy: None,
        }
    }

    /// Returns the cached call tree, if one was traced.
    #[must_use]
    pub const fn hierarchy(&self) -> Option<&CallNode> {
        self.hierarchy.as_ref()
    }

    /// Returns the underlying hierarchy builder.
    #[must_use]
    pub const fn builder(&self) -> &HierarchyBuilder<C, D> {
        &self.builder
    }

    /// Drops the cached call tree so the next trace walks the hierarchy again.
    pub fn reset(&mut self) {
        self.hierarchy = None;
    }

    /// Renders the prompt for the cached call tree.
    ///
    /// # Errors
    /// Returns [`GraphError::NoHierarchy`] before a trace, or
    /// [`GraphError::NoSources`] when the tree carries no source text.
    pub fn prompt<P: ProgressSink + ?Sized>(
        &self,
        kind: &str,
        progress: &mut P,
    ) -> Result<String, GraphError> {
        let root = self.hierarchy.as_ref().ok_or(GraphError::NoHierarchy)?;
        render_prompt(root, kind, progress)
    }

    /// Adds click directives for the cached call tree to `diagram`.
    ///
    /// Without a cached tree the diagram is returned unchanged.
    pub fn add_links<P: ProgressSink + ?Sized>(&self, diagram: &str, progress: &mut P) -> String {
        let Some(root) = self.hierarchy.as_ref() else {
            progress.progress("Call hierarchy data not found; cannot add links.");
            return diagram.to_owned();
        };
        add_links(diagram, &collect_sources(root), progress)
    }

    /// Cleans `markup` and adds click directives for the cached call tree.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyDiagram`] when `markup` is blank.
    pub fn cleanup<P: ProgressSink + ?Sized>(
        &self,
        markup: &str,
        progress: &mut P,
    ) -> Result<String, GraphError> {
        let records = self.hierarchy.as_ref().map(collect_sources).unwrap_or_default();
        cleanup_diagram(markup, &records, progress)
    }
}

impl<C: CallHierarchyClient, D: DocumentSource> CallMapSession<C, D> {
    /// Returns the call tree for `position`, tracing it on first use.
    ///
    /// Once a tree is cached it is returned for every later call until
    /// [`Self::reset`].
    ///
    /// # Errors
    /// Returns [`GraphError::SymbolNotFound`] when no root resolves at
    /// `position`, or [`GraphError::NoWorkspace`] when no workspace root is
    /// configured.
    #[instrument(level = "debug", skip(self, progress), fields(path = %position.path))]
    pub fn trace<P: ProgressSink + ?Sized>(
        &mut self,
        position: &SourcePosition,
        progress: &mut P,
    ) -> Result<&CallNode, GraphError> {
        if self.hierarchy.is_some() {
            progress.progress("Reusing existing call hierarchy data.");
        } else {
            progress.progress("Fetching call hierarchy data...");
            let traversal = self.walk(position, progress).inspect_err(|error| {
                progress.progress(&format!("Error fetching call hierarchy data: {error}"));
            })?;
            info!(visited = traversal.visited_count(), "cached call hierarchy");
            self.hierarchy = Some(traversal.into_root());
            progress.progress("Call hierarchy data fetched.");
        }
        self.hierarchy.as_ref().ok_or(GraphError::NoHierarchy)
    }

    fn walk<P: ProgressSink + ?Sized>(
        &mut self,
        position: &SourcePosition,
        progress: &mut P,
    ) -> Result<Traversal, GraphError> {
        let root = self.builder.prepare_root(position)?;
        self.builder.build(&root, progress)
    }
}
