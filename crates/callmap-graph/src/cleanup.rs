//! Normalisation of generated diagram markup.

use regex::{Captures, Regex};

use crate::collector::SourceRecord;
use crate::error::GraphError;
use crate::links::add_links;
use crate::provider::ProgressSink;

const FENCED_DIAGRAM: &str = r"(?s)^(\s*```mermaid[ \t]*\n?)(.*?)(\n?\s*```\s*)$";
const BRACKET_LABEL: &str = r"\[(.*?)\]";

/// Cleans diagram markup and adds click directives for `records`.
///
/// An optional mermaid code fence is set aside, unquoted square-bracket
/// labels are quoted, trailing whitespace is trimmed from every line, and
/// links are appended to the diagram body before the fence is restored.
///
/// # Errors
/// Returns [`GraphError::EmptyDiagram`] when `markup` is blank.
pub fn cleanup_diagram<P: ProgressSink + ?Sized>(
    markup: &str,
    records: &[SourceRecord],
    progress: &mut P,
) -> Result<String, GraphError> {
    if markup.trim().is_empty() {
        return Err(GraphError::EmptyDiagram);
    }

    let fenced = Regex::new(FENCED_DIAGRAM)?;
    let (prefix, body, suffix) = fenced.captures(markup).map_or(("", markup, ""), |captures| {
        (
            group(&captures, 1),
            group(&captures, 2),
            group(&captures, 3),
        )
    });

    let quoted = quote_labels(body)?;
    let trimmed = quoted
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    let linked = add_links(&trimmed, records, progress);

    progress.progress("Diagram cleaned and links processed.");
    Ok(format!("{prefix}{linked}{suffix}"))
}

/// Quotes square-bracket node labels that are not already quoted.
///
/// Labels such as `["text"]`, `[("text")]`, and nested `[[text]]` forms are
/// left untouched, as are empty labels. Double quotes inside a label are
/// written as `#quot;`.
///
/// # Errors
/// Returns [`GraphError::Pattern`] if the label pattern fails to compile.
pub fn quote_labels(body: &str) -> Result<String, GraphError> {
    let bracket = Regex::new(BRACKET_LABEL)?;
    Ok(bracket
        .replace_all(body, |captures: &Captures<'_>| quote_label(group(captures, 1)))
        .into_owned())
}

fn quote_label(original: &str) -> String {
    let label = original.trim();
    let already_quoted = label.len() >= 2 && label.starts_with('"') && label.ends_with('"');
    let rounded = label.starts_with("(\"") && label.ends_with("\")");
    if label.is_empty() || already_quoted || rounded || label.starts_with('[') {
        return format!("[{original}]");
    }
    format!("[\"{}\"]", label.replace('"', "#quot;"))
}

fn group<'h>(captures: &Captures<'h>, index: usize) -> &'h str {
    captures.get(index).map_or("", |matched| matched.as_str())
}
