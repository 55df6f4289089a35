//! Workspace boundary classification.
//!
//! A node is in scope when its file lies under a workspace root and its owner
//! identifier does not look like third-party or standard-library code. Both
//! checks are plain string heuristics: roots match by string prefix (no
//! separator or case normalisation) and external markers match by substring
//! containment anywhere in the owner identifier.

use callmap_config::{Config, default_external_markers};
use camino::{Utf8Path, Utf8PathBuf};

/// Classification of a node relative to the workspace boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Local file with a non-external owner; expanded and annotated.
    InScope,
    /// Outside the workspace or owned by an external package.
    External,
}

/// Decides whether files and owners belong to the workspace under analysis.
#[derive(Debug, Clone, Default)]
pub struct BoundaryClassifier {
    workspace_roots: Vec<Utf8PathBuf>,
    external_markers: Vec<String>,
}

impl BoundaryClassifier {
    /// Creates a classifier from workspace roots and an external-package
    /// deny-list.
    #[must_use]
    pub fn new<R, M>(
        workspace_roots: impl IntoIterator<Item = R>,
        external_markers: impl IntoIterator<Item = M>,
    ) -> Self
    where
        R: Into<Utf8PathBuf>,
        M: Into<String>,
    {
        Self {
            workspace_roots: workspace_roots.into_iter().map(Into::into).collect(),
            external_markers: external_markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a classifier using the built-in deny-list.
    #[must_use]
    pub fn with_default_markers<R: Into<Utf8PathBuf>>(
        workspace_roots: impl IntoIterator<Item = R>,
    ) -> Self {
        Self::new(workspace_roots, default_external_markers())
    }

    /// Creates a classifier from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.workspace_roots(), config.external_markers())
    }

    /// Returns the configured workspace roots.
    #[must_use]
    pub fn workspace_roots(&self) -> &[Utf8PathBuf] {
        &self.workspace_roots
    }

    /// Returns the external-package deny-list.
    #[must_use]
    pub fn external_markers(&self) -> &[String] {
        &self.external_markers
    }

    /// Returns whether any workspace root is configured.
    #[must_use]
    pub fn has_workspace(&self) -> bool {
        !self.workspace_roots.is_empty()
    }

    /// Returns whether `path` starts with any workspace root.
    ///
    /// This is a string prefix test: `/ws` also matches `/wsother/A.java`.
    #[must_use]
    pub fn is_local(&self, path: &Utf8Path) -> bool {
        self.workspace_roots
            .iter()
            .any(|root| path.as_str().starts_with(root.as_str()))
    }

    /// Returns whether the owner identifier names an external package.
    ///
    /// Absent owners are never external.
    #[must_use]
    pub fn is_external_package(&self, detail: Option<&str>) -> bool {
        detail.is_some_and(|owner| {
            self.external_markers
                .iter()
                .any(|marker| owner.contains(marker.as_str()))
        })
    }

    /// Classifies a node by file and owner identifier.
    #[must_use]
    pub fn classify(&self, path: &Utf8Path, detail: Option<&str>) -> Scope {
        if self.is_local(path) && !self.is_external_package(detail) {
            Scope::InScope
        } else {
            Scope::External
        }
    }
}
