//! Shared configuration for the callmap toolchain.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then an
//! optional TOML file (`--config-path` or `CALLMAP_CONFIG_PATH`), then
//! `CALLMAP_*` environment variables, then command-line flags. The library
//! crates never read configuration themselves; callers pass the loaded
//! [`Config`] (or values derived from it) into the traversal and rendering
//! entry points.

mod defaults;
mod logging;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_ANNOTATION_LOOKAHEAD, DEFAULT_ANNOTATION_LOOKBEHIND, DEFAULT_DIAGRAM_KIND,
    DEFAULT_EXTERNAL_MARKERS, DEFAULT_LOG_FILTER, default_annotation_lookahead,
    default_annotation_lookbehind, default_diagram_kind, default_external_markers,
    default_log_filter, default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration shared by the callmap binary and library callers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "CALLMAP")]
pub struct Config {
    /// `tracing` filter expression applied to the telemetry subscriber.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format for log records.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Directories whose files count as local to the workspace.
    #[serde(default)]
    pub workspace_roots: Vec<String>,
    /// Additional owner-identifier fragments treated as external packages.
    #[serde(default)]
    pub extra_external_markers: Vec<String>,
    /// Lines scanned above a class declaration for annotations.
    #[serde(default = "default_annotation_lookbehind")]
    pub annotation_lookbehind: u32,
    /// Lines scanned below a class declaration for modifiers.
    #[serde(default = "default_annotation_lookahead")]
    pub annotation_lookahead: u32,
    /// Diagram kind used when a prompt request does not name one.
    #[serde(default = "default_diagram_kind")]
    pub diagram_kind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            workspace_roots: Vec::new(),
            extra_external_markers: Vec::new(),
            annotation_lookbehind: DEFAULT_ANNOTATION_LOOKBEHIND,
            annotation_lookahead: DEFAULT_ANNOTATION_LOOKAHEAD,
            diagram_kind: default_diagram_kind(),
        }
    }
}

impl Config {
    /// Returns the configured log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the configured workspace roots as UTF-8 paths.
    #[must_use]
    pub fn workspace_roots(&self) -> Vec<Utf8PathBuf> {
        self.workspace_roots
            .iter()
            .map(Utf8PathBuf::from)
            .collect()
    }

    /// Returns the full external-package deny-list: built-in markers
    /// followed by any configured extras.
    #[must_use]
    pub fn external_markers(&self) -> Vec<String> {
        let mut markers = default_external_markers();
        markers.extend(self.extra_external_markers.iter().cloned());
        markers
    }

    /// Returns the configured default diagram kind.
    #[must_use]
    pub fn diagram_kind(&self) -> &str {
        &self.diagram_kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.workspace_roots().is_empty());
        assert_eq!(config.annotation_lookbehind, 20);
        assert_eq!(config.annotation_lookahead, 3);
        assert_eq!(config.diagram_kind(), "sequence");
    }

    #[test]
    fn extra_markers_extend_the_builtin_list() {
        let config = Config {
            extra_external_markers: vec!["io.vendor.".to_owned()],
            ..Config::default()
        };
        let markers = config.external_markers();
        assert_eq!(markers.len(), DEFAULT_EXTERNAL_MARKERS.len() + 1);
        assert_eq!(markers.first().map(String::as_str), Some("java."));
        assert_eq!(markers.last().map(String::as_str), Some("io.vendor."));
    }

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("COMPACT", LogFormat::Compact)]
    #[case("Compact", LogFormat::Compact)]
    fn log_format_parses_case_insensitively(#[case] text: &str, #[case] expected: LogFormat) {
        assert_eq!(LogFormat::from_str(text).ok(), Some(expected));
    }

    #[test]
    fn log_format_rejects_unknown_values() {
        assert!(LogFormat::from_str("yaml").is_err());
    }
}
