//! Class declaration annotation lookup.
//!
//! Given a document and a simple class name, the annotator finds the class
//! symbol and returns the block of modifier and annotation lines around its
//! declaration. The scan is a line-by-line heuristic, not a parser: each
//! physical line is classified on its own, so a multi-line annotation whose
//! arguments continue on following lines only contributes its first line.

use callmap_config::{Config, DEFAULT_ANNOTATION_LOOKAHEAD, DEFAULT_ANNOTATION_LOOKBEHIND};
use lsp_types::{DocumentSymbol, DocumentSymbolResponse, Range, SymbolKind, Uri};
use tracing::{debug, warn};

use crate::error::GraphError;
use crate::provider::DocumentSource;

/// Owner fragment that signals a malformed owner identifier.
///
/// Owners such as `com` (a bare package root) would otherwise be looked up as
/// a class name and silently match nothing useful.
pub const RESERVED_CLASS_NAME: &str = "com";

const ANNOTATION_MARKER: &str = "@";
const BLOCK_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "abstract",
    "final",
    "static",
];
const ACCESS_MODIFIERS: &[&str] = &["public", "private", "protected"];

/// Returns the simple class name of an owner identifier: the text after the
/// last `.`, or the whole identifier when it has none.
#[must_use]
pub fn simple_class_name(owner: &str) -> &str {
    owner.rsplit('.').next().unwrap_or(owner)
}

/// Result of a class lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Modifier and annotation lines, newline-joined; empty when not found.
    pub annotations: String,
    /// Name of the matched class, or the requested name when not found.
    pub class_name: String,
    /// Range of the class symbol when it was found.
    pub range: Option<Range>,
}

impl ClassInfo {
    /// Returns the empty result reported when the class cannot be located.
    #[must_use]
    pub fn not_found(class_name: impl Into<String>) -> Self {
        Self {
            annotations: String::new(),
            class_name: class_name.into(),
            range: None,
        }
    }

    /// Returns whether the class symbol was located.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.range.is_some()
    }
}

/// Lines scanned around a class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationWindow {
    /// Lines above the declaration start.
    pub lookbehind: u32,
    /// Lines below the declaration start.
    pub lookahead: u32,
}

impl Default for AnnotationWindow {
    fn default() -> Self {
        Self {
            lookbehind: DEFAULT_ANNOTATION_LOOKBEHIND,
            lookahead: DEFAULT_ANNOTATION_LOOKAHEAD,
        }
    }
}

/// Looks up class declarations and extracts their annotation blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationAnnotator {
    window: AnnotationWindow,
}

impl DeclarationAnnotator {
    /// Creates an annotator with the given search window.
    #[must_use]
    pub const fn new(window: AnnotationWindow) -> Self {
        Self { window }
    }

    /// Creates an annotator from loaded configuration.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self::new(AnnotationWindow {
            lookbehind: config.annotation_lookbehind,
            lookahead: config.annotation_lookahead,
        })
    }

    /// Returns the search window.
    #[must_use]
    pub const fn window(&self) -> AnnotationWindow {
        self.window
    }

    /// Finds `class_name` in the document and returns its annotation block.
    ///
    /// Missing symbols, unmatched names, and provider failures all produce
    /// [`ClassInfo::not_found`].
    ///
    /// # Errors
    /// Returns [`GraphError::ReservedClassName`] when `class_name` is
    /// [`RESERVED_CLASS_NAME`].
    pub fn class_info<D: DocumentSource + ?Sized>(
        &self,
        documents: &mut D,
        uri: &Uri,
        class_name: &str,
    ) -> Result<ClassInfo, GraphError> {
        if class_name == RESERVED_CLASS_NAME {
            return Err(GraphError::reserved_class_name(class_name));
        }
        if class_name.is_empty() {
            return Ok(ClassInfo::not_found(class_name));
        }

        let symbols = match documents.document_symbols(uri) {
            Ok(Some(symbols)) => symbols,
            Ok(None) => return Ok(ClassInfo::not_found(class_name)),
            Err(error) => {
                warn!(uri = uri.as_str(), %error, "document symbol lookup failed");
                return Ok(ClassInfo::not_found(class_name));
            }
        };

        let Some((name, range)) = find_class(&symbols, class_name) else {
            debug!(uri = uri.as_str(), class_name, "class symbol not found");
            return Ok(ClassInfo::not_found(class_name));
        };

        let declaration = range.start.line;
        let window_start = declaration.saturating_sub(self.window.lookbehind);
        let window_end = declaration.saturating_add(self.window.lookahead);
        let text = match documents.read_lines(uri, window_start, window_end) {
            Ok(text) => text,
            Err(error) => {
                warn!(uri = uri.as_str(), %error, "failed to read declaration window");
                return Ok(ClassInfo::not_found(class_name));
            }
        };

        let lines: Vec<&str> = text.lines().collect();
        let offset = usize::try_from(declaration - window_start).unwrap_or(usize::MAX);
        Ok(ClassInfo {
            annotations: extract_declaration_block(&lines, offset),
            class_name: name,
            range: Some(range),
        })
    }
}

fn find_class(symbols: &DocumentSymbolResponse, class_name: &str) -> Option<(String, Range)> {
    match symbols {
        DocumentSymbolResponse::Flat(items) => items
            .iter()
            .find(|item| item.kind == SymbolKind::CLASS && item.name == class_name)
            .map(|item| (item.name.clone(), item.location.range)),
        DocumentSymbolResponse::Nested(items) => find_nested_class(items, class_name)
            .map(|symbol| (symbol.name.clone(), symbol.range)),
    }
}

fn find_nested_class<'a>(symbols: &'a [DocumentSymbol], class_name: &str) -> Option<&'a DocumentSymbol> {
    symbols.iter().find_map(|symbol| {
        if symbol.kind == SymbolKind::CLASS && symbol.name == class_name {
            return Some(symbol);
        }
        symbol
            .children
            .as_deref()
            .and_then(|children| find_nested_class(children, class_name))
    })
}

/// Extracts the modifier/annotation block around `declaration`.
///
/// The block is the run of lines that are blank, comments, annotations, or
/// start with a modifier keyword, extended upwards from the declaration and
/// then read downwards until the first line that is none of those. Package,
/// import, and code lines above the block are never reached, so annotations
/// separated from the declaration by code are not attributed to it. Only
/// annotation lines and lines starting with an access modifier are returned.
#[must_use]
pub fn extract_declaration_block(lines: &[&str], declaration: usize) -> String {
    let trimmed: Vec<&str> = lines.iter().map(|line| line.trim()).collect();
    if trimmed.is_empty() {
        return String::new();
    }
    let anchor = declaration.min(trimmed.len() - 1);

    let mut first = anchor;
    while first > 0
        && trimmed
            .get(first - 1)
            .is_some_and(|line| continues_block(line))
    {
        first -= 1;
    }

    trimmed
        .iter()
        .skip(first)
        .take_while(|line| continues_block(line))
        .filter(|line| is_emitted(line))
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_annotation(line: &str) -> bool {
    line.starts_with(ANNOTATION_MARKER)
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}

fn starts_with_block_modifier(line: &str) -> bool {
    line.split_once(char::is_whitespace)
        .is_some_and(|(word, _)| BLOCK_MODIFIERS.contains(&word))
}

fn continues_block(line: &str) -> bool {
    line.is_empty() || is_annotation(line) || is_comment(line) || starts_with_block_modifier(line)
}

fn is_emitted(line: &str) -> bool {
    is_annotation(line)
        || ACCESS_MODIFIERS
            .iter()
            .any(|modifier| line.starts_with(modifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SERVICE: &str = "\
package com.example;

import java.util.List;

/**
 * Order handling.
 */
@Service
@Transactional(readOnly = true)
public class OrderService {
    private final OrderRepository repository;

    public OrderService(OrderRepository repository) {
        this.repository = repository;
    }
}";

    #[rstest]
    #[case("com.example.OrderService", "OrderService")]
    #[case("OrderService", "OrderService")]
    #[case("com.example.", "")]
    #[case("com", "com")]
    fn simple_class_name_takes_last_segment(#[case] owner: &str, #[case] expected: &str) {
        assert_eq!(simple_class_name(owner), expected);
    }

    #[test]
    fn block_keeps_annotations_and_access_modifiers() {
        let lines: Vec<&str> = SERVICE.lines().collect();
        let block = extract_declaration_block(&lines, 9);

        assert_eq!(
            block,
            "@Service\n\
             @Transactional(readOnly = true)\n\
             public class OrderService {\n\
             private final OrderRepository repository;\n\
             public OrderService(OrderRepository repository) {"
        );
    }

    #[test]
    fn block_stops_at_first_non_declaration_line() {
        let lines = ["@Entity", "class Plain {", "@Ignored", "public int x;"];
        assert_eq!(extract_declaration_block(&lines, 1), "@Entity");
    }

    #[test]
    fn block_does_not_climb_past_code() {
        let lines = [
            "    }",
            "}",
            "",
            "@Component",
            "public class Next {",
        ];
        assert_eq!(
            extract_declaration_block(&lines, 4),
            "@Component\npublic class Next {"
        );
    }

    #[test]
    fn block_is_anchored_at_the_declaration() {
        let lines = [
            "package com.acme;",
            "import java.util.List;",
            "@Deprecated",
            "int helper = 0;",
            "@Service",
            "public class OrderService {",
            "    private int count;",
            "    void run() {",
        ];
        assert_eq!(
            extract_declaration_block(&lines, 5),
            "@Service\npublic class OrderService {\nprivate int count;"
        );
    }

    #[test]
    fn block_of_empty_window_is_empty() {
        assert_eq!(extract_declaration_block(&[], 3), "");
    }
}
