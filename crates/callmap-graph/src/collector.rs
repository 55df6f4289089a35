//! Flattening of call trees into source records.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::node::CallNode;

/// Class name recorded when a node carries no owner identifier.
pub const UNKNOWN_CLASS: &str = "Unknown Class";

/// Method signature recorded when a node carries no name.
pub const UNKNOWN_METHOD: &str = "unknownMethod";

/// Source text of one in-scope node, ready for prompt rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    /// Trimmed, non-empty source text.
    pub source: String,
    /// File containing the method.
    pub filename: Utf8PathBuf,
    /// Owner identifier, or [`UNKNOWN_CLASS`].
    pub class_name: String,
    /// Method name and signature, or [`UNKNOWN_METHOD`].
    pub method_name_signature: String,
    /// Modifier and annotation block of the owning class.
    pub class_annotations: String,
    /// First line of the method (1-based).
    pub start_line: u32,
}

impl SourceRecord {
    fn from_node(node: &CallNode, source: &str) -> Self {
        let location = node.location();
        Self {
            source: source.to_owned(),
            filename: location.file.clone(),
            class_name: node
                .detail()
                .filter(|detail| !detail.is_empty())
                .unwrap_or(UNKNOWN_CLASS)
                .to_owned(),
            method_name_signature: if node.name().is_empty() {
                UNKNOWN_METHOD.to_owned()
            } else {
                node.name().to_owned()
            },
            class_annotations: node.class_annotations().to_owned(),
            start_line: location.start_line,
        }
    }
}

/// Collects a record for every node with non-blank source, in pre-order.
///
/// Nodes reachable along several paths contribute one record per path.
#[must_use]
pub fn collect_sources(root: &CallNode) -> Vec<SourceRecord> {
    let mut records = Vec::new();
    collect_into(root, &mut records);
    records
}

fn collect_into(node: &CallNode, records: &mut Vec<SourceRecord>) {
    let source = node.source().trim();
    if !source.is_empty() {
        records.push(SourceRecord::from_node(node, source));
    }
    for call in node.outgoing_calls() {
        collect_into(call, records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::CallLocation;

    fn node(name: &str, source: &str) -> CallNode {
        CallNode::new(name, CallLocation::new("/ws/src/A.java", 3, 5))
            .with_detail("com.example.A")
            .with_source(source, "@Service")
    }

    #[test]
    fn flattens_root_then_grandchild() {
        let mut child = node("child()", "   ");
        child.push_call(node("grandchild()", "  void grandchild() {}\n"));
        let mut root = node("root()", "void root() {}");
        root.push_call(child);

        let records = collect_sources(&root);

        let names: Vec<&str> = records
            .iter()
            .map(|record| record.method_name_signature.as_str())
            .collect();
        assert_eq!(names, ["root()", "grandchild()"]);
        assert_eq!(
            records.get(1).map(|record| record.source.as_str()),
            Some("void grandchild() {}")
        );
    }

    #[test]
    fn missing_names_use_fallbacks() {
        let root = CallNode::new("", CallLocation::new("/ws/A.java", 1, 2)).with_source("x();", "");

        let records = collect_sources(&root);

        assert_eq!(records.len(), 1);
        let record = records.first().expect("one record");
        assert_eq!(record.class_name, UNKNOWN_CLASS);
        assert_eq!(record.method_name_signature, UNKNOWN_METHOD);
        assert_eq!(record.start_line, 1);
    }

    #[test]
    fn repeated_nodes_are_not_deduplicated() {
        let mut root = node("root()", "void root() {}");
        root.push_call(node("shared()", "void shared() {}"));
        root.push_call(node("shared()", "void shared() {}"));

        assert_eq!(collect_sources(&root).len(), 3);
    }

    #[test]
    fn external_nodes_contribute_nothing() {
        let mut root = node("root()", "void root() {}");
        root.push_call(
            CallNode::new("size()", CallLocation::new("/jdk/List.java", 1, 1))
                .with_detail("java.util.List")
                .into_external(),
        );

        assert_eq!(collect_sources(&root).len(), 1);
    }
}
