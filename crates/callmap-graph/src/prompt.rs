//! Prompt rendering for diagram generation.
//!
//! A prompt is an instruction header followed by one delimited section per
//! source record. Each section names the method's identifier, its click
//! directive, and its class, then lists annotations and code. Method
//! annotations are split from code line by line: any line whose trimmed form
//! starts with `@` counts as an annotation, even inside a comment or string.

use std::str::FromStr;

use strum::{Display, EnumString};
use tracing::instrument;

use crate::collector::{SourceRecord, collect_sources};
use crate::error::GraphError;
use crate::ident::make_id;
use crate::links::LinkDefinition;
use crate::node::CallNode;
use crate::provider::ProgressSink;

/// Line separating prompt sections.
pub const PROMPT_DELIMITER: &str = "################################";

const ANNOTATION_MARKER: &str = "@";

const SEQUENCE_INSTRUCTIONS: &str = "Please create a Mermaid Sequence Diagram using these Java classes. \
The first entry begins the diagram. \
For each class provided, use its name (e.g., ProductController.java) as the participant alias and description in the diagram. \
Feel free to add multiple levels (6 or more) if it makes sense. \
Please include each method call in your diagram. \
Include \"Note over\" in several places to call out what functionality is doing. \
Include if/else conditions, and include details about SQL queries.";

const FLOWCHART_INSTRUCTIONS: &str = "Please create a Mermaid Flowchart using these Java classes. \
Use flowchart LR (left to right) direction. \
For each class provided, use its name (e.g., ProductController.java) as the node ID and the displayed text in the diagram. \
Group related methods by class using subgraphs if it makes sense. \
Show the control flow between methods/classes. \
Style external calls differently using dashed lines. \
Show URLs and REST API calls. Show SQL queries. \
Use the IDs provided for each method. \
Include control flow (if/else, for/while) and add notes for important logic.";

const FLOWCHART_LINKS_INSTRUCTIONS: &str = "Please create a Mermaid Flowchart using these Java classes. \
Use flowchart LR (left to right) direction. \
For each class provided below, use its name (e.g., ProductController.java) as the node ID and as the displayed text. \
IMPORTANT: Create a click interaction for each class node using the \"Link:\" information provided for it, \
copying the directive exactly as given. \
Show the control flow between methods/classes. \
Style external calls differently using dashed lines.";

/// Kind of diagram a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DiagramKind {
    /// Sequence diagram.
    #[default]
    Sequence,
    /// Left-to-right flowchart.
    Flowchart,
    /// Flowchart with a click directive per class node.
    FlowchartLinks,
}

impl DiagramKind {
    /// Resolves a kind name; blank names select the default.
    ///
    /// Unknown names yield `None`.
    #[must_use]
    pub fn resolve(kind: &str) -> Option<Self> {
        let trimmed = kind.trim();
        if trimmed.is_empty() {
            return Some(Self::default());
        }
        Self::from_str(trimmed).ok()
    }

    /// Returns the instruction header for this kind.
    #[must_use]
    pub const fn instructions(self) -> &'static str {
        match self {
            Self::Sequence => SEQUENCE_INSTRUCTIONS,
            Self::Flowchart => FLOWCHART_INSTRUCTIONS,
            Self::FlowchartLinks => FLOWCHART_LINKS_INSTRUCTIONS,
        }
    }
}

/// Renders the prompt for `records`.
///
/// Unknown kinds render without an instruction header.
///
/// # Errors
/// Returns [`GraphError::NoSources`] when `records` is empty.
pub fn build_prompt(records: &[SourceRecord], kind: &str) -> Result<String, GraphError> {
    if records.is_empty() {
        return Err(GraphError::NoSources);
    }

    let mut lines: Vec<String> = Vec::new();
    if let Some(diagram) = DiagramKind::resolve(kind) {
        lines.push(diagram.instructions().to_owned());
        lines.push(String::new());
    }
    for record in records {
        push_section(&mut lines, record);
    }
    lines.push(PROMPT_DELIMITER.to_owned());
    Ok(lines.join("\n"))
}

/// Collects the sources of `root` and renders their prompt, reporting
/// progress along the way.
///
/// # Errors
/// Returns [`GraphError::NoSources`] when no node in the tree carries
/// source text.
#[instrument(level = "debug", skip(root, progress))]
pub fn render_prompt<P: ProgressSink + ?Sized>(
    root: &CallNode,
    kind: &str,
    progress: &mut P,
) -> Result<String, GraphError> {
    let label = display_kind(kind);
    progress.progress(&format!("Generating {label} diagram prompt..."));

    let records = collect_sources(root);
    if records.is_empty() {
        progress.progress("Prompt generation failed: No source code found.");
        return Err(GraphError::NoSources);
    }

    let prompt = build_prompt(&records, kind)?;
    progress.progress(&format!("{label} diagram prompt generated."));
    Ok(prompt)
}

fn display_kind(kind: &str) -> String {
    DiagramKind::resolve(kind).map_or_else(|| kind.trim().to_owned(), |known| known.to_string())
}

fn push_section(lines: &mut Vec<String>, record: &SourceRecord) {
    let (method_annotations, method_code): (Vec<&str>, Vec<&str>) = record
        .source
        .split('\n')
        .partition(|line| line.trim().starts_with(ANNOTATION_MARKER));

    lines.push(PROMPT_DELIMITER.to_owned());
    lines.push(format!(
        "ID: {}",
        make_id(&record.class_name, &record.method_name_signature)
    ));
    lines.push(format!(
        "Link: {}",
        LinkDefinition::from_record(record).directive()
    ));
    lines.push(format!("Class: {}", record.class_name));
    if !record.class_annotations.is_empty() {
        lines.push("Class Annotations:".to_owned());
        lines.push(record.class_annotations.clone());
    }
    if !method_annotations.is_empty() {
        lines.push("Method Annotations:".to_owned());
        lines.push(method_annotations.join("\n"));
    }
    lines.push(method_code.join("\n"));
}
