//! Click directives for generated diagrams.
//!
//! Each source record becomes a `click` directive that opens the method's
//! file in the editor. Directives are inserted just before the closing fence
//! of the diagram, or appended when the diagram has no fence.

use std::collections::HashSet;

use camino::Utf8PathBuf;
use tracing::debug;

use crate::collector::SourceRecord;
use crate::ident::make_id;
use crate::provider::ProgressSink;
use crate::uri::{absolute_path, base_filename, file_link};

const FENCE: &str = "```";
const DIRECTIVE_INDENT: &str = "    ";

/// Target of one click directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    /// Diagram node identifier.
    pub id: String,
    /// Absolute path of the file to open.
    pub file_path: Utf8PathBuf,
    /// Final path component, shown in the tooltip.
    pub base_filename: String,
    /// Start line recorded for the method (1-based).
    pub start_line: u32,
}

impl LinkDefinition {
    /// Builds the definition for a source record.
    #[must_use]
    pub fn from_record(record: &SourceRecord) -> Self {
        Self {
            id: make_id(&record.class_name, &record.method_name_signature),
            file_path: absolute_path(&record.filename),
            base_filename: base_filename(&record.filename).to_owned(),
            start_line: record.start_line,
        }
    }

    /// Renders the `click` directive for this definition.
    ///
    /// The link targets `start_line + 1`.
    #[must_use]
    pub fn directive(&self) -> String {
        format!(
            "click {} href \"{}\" \"Open {}\"",
            self.id,
            file_link(&self.file_path, Some(self.start_line.saturating_add(1))),
            self.base_filename
        )
    }
}

/// Builds one definition per distinct identifier; the first record with a
/// given identifier wins.
#[must_use]
pub fn link_definitions(records: &[SourceRecord]) -> Vec<LinkDefinition> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| !record.filename.as_str().is_empty())
        .map(LinkDefinition::from_record)
        .filter(|definition| seen.insert(definition.id.clone()))
        .collect()
}

/// Inserts `directives` before the last closing fence of `diagram`.
///
/// Without a fence, the directives are appended on new lines.
#[must_use]
pub fn insert_link_directives(diagram: &str, directives: &[String]) -> String {
    if directives.is_empty() {
        return diagram.to_owned();
    }

    let Some(fence_start) = diagram.rfind(FENCE) else {
        return format!("{diagram}\n{}", directives.join("\n"));
    };
    let (content, fence) = diagram.split_at(fence_start);
    let separator = format!("\n{DIRECTIVE_INDENT}");
    format!(
        "{}{separator}{}\n{fence}",
        content.trim_end(),
        directives.join(separator.as_str())
    )
}

/// Adds click directives for `records` to `diagram`.
///
/// Directives already present as lines of the diagram are not added again,
/// so running this twice leaves the second run unchanged. When no link can
/// be derived the diagram is returned as is, after reporting why.
pub fn add_links<P: ProgressSink + ?Sized>(
    diagram: &str,
    records: &[SourceRecord],
    progress: &mut P,
) -> String {
    if records.is_empty() {
        progress.progress("No source data collected from call hierarchy; cannot add links.");
        return diagram.to_owned();
    }

    let definitions = link_definitions(records);
    if definitions.is_empty() {
        progress.progress("No valid link definitions generated from call hierarchy.");
        return diagram.to_owned();
    }

    let existing: HashSet<&str> = diagram.lines().map(str::trim).collect();
    let directives: Vec<String> = definitions
        .iter()
        .map(LinkDefinition::directive)
        .filter(|directive| !existing.contains(directive.as_str()))
        .collect();
    if directives.is_empty() {
        debug!("diagram already carries every link directive");
        return diagram.to_owned();
    }

    let linked = insert_link_directives(diagram, &directives);
    progress.progress("Clickable links added to the diagram.");
    linked
}
