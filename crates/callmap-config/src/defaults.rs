use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Lines scanned above a class declaration when collecting its modifiers.
pub const DEFAULT_ANNOTATION_LOOKBEHIND: u32 = 20;

/// Lines scanned below a class declaration when collecting its modifiers.
pub const DEFAULT_ANNOTATION_LOOKAHEAD: u32 = 3;

/// Diagram kind used when a prompt request does not name one.
pub const DEFAULT_DIAGRAM_KIND: &str = "sequence";

/// Owner-identifier fragments that mark a symbol as third-party or
/// standard-library code.
///
/// Matching is substring containment, so `java.` also matches
/// `com.example.java.Helper`.
pub const DEFAULT_EXTERNAL_MARKERS: &[&str] = &[
    "java.",
    "javax.",
    "java.base/",
    "org.springframework",
    "com.google",
    "org.apache",
    "com.fasterxml",
    "junit.",
    "org.junit",
    "org.mockito",
    "com.sun.",
    "sun.",
    "jdk.",
    "io.netty.",
    "org.slf4j",
    "org.yaml",
    "org.json",
    "com.intellij",
    "kotlin.",
    "scala.",
    "groovy.",
];

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned diagram kind default used by serde.
#[must_use]
pub fn default_diagram_kind() -> String {
    DEFAULT_DIAGRAM_KIND.to_owned()
}

/// Default annotation look-behind used by serde.
#[must_use]
pub const fn default_annotation_lookbehind() -> u32 {
    DEFAULT_ANNOTATION_LOOKBEHIND
}

/// Default annotation look-ahead used by serde.
#[must_use]
pub const fn default_annotation_lookahead() -> u32 {
    DEFAULT_ANNOTATION_LOOKAHEAD
}

/// Returns the built-in external-package deny-list as owned strings.
#[must_use]
pub fn default_external_markers() -> Vec<String> {
    DEFAULT_EXTERNAL_MARKERS
        .iter()
        .map(|marker| (*marker).to_owned())
        .collect()
}
