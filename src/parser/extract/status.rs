use std::sync::LazyLock;

use regex::Regex;

use crate::parser::tree::{Node, NodeKind, PageTree};

static STATUS_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Page Status\s*[:\-]?\s*(.+)").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const LABEL: &str = "page status";
pub const FINALIZED: &str = "confluence page finalized";

type Strategy = fn(&PageTree) -> Option<String>;

/// Tried in order; the first hit wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("labeled_node", from_labeled_node),
    ("full_text", from_full_text),
];

pub fn status_of(tree: &PageTree) -> Option<String> {
    STRATEGIES.iter().find_map(|(name, strategy)| {
        let status = strategy(tree)?;
        tracing::trace!(strategy = name, status = %status, "status found");
        Some(status)
    })
}

pub fn is_finalized(status: Option<&str>) -> bool {
    status.is_some_and(|s| normalize(s) == FINALIZED)
}

/// Collapse whitespace, trim, lowercase.
pub fn normalize(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_lowercase()
}

fn is_label_holder(node: &Node) -> bool {
    matches!(
        node.kind(),
        NodeKind::Cell
            | NodeKind::Span
            | NodeKind::Division
            | NodeKind::Paragraph
            | NodeKind::Bold
            | NodeKind::Strong
    )
}

fn is_value_holder(node: &Node) -> bool {
    matches!(
        node.kind(),
        NodeKind::Cell | NodeKind::Span | NodeKind::Division | NodeKind::Paragraph
    )
}

fn from_labeled_node(tree: &PageTree) -> Option<String> {
    tree.elements()
        .filter(is_label_holder)
        .filter(|n| normalize(&n.joined_text(" ")) == LABEL)
        .find_map(|label| value_beside(&label))
}

fn value_beside(label: &Node) -> Option<String> {
    let sibling = label
        .next_siblings()
        .find(is_value_holder)
        .map(|n| n.joined_text(" "))
        .filter(|t| !t.is_empty());
    if sibling.is_some() {
        return sibling;
    }

    label
        .parent()?
        .descendants()
        .filter(is_value_holder)
        .map(|n| n.joined_text(" "))
        .find(|t| !t.is_empty() && normalize(t) != LABEL)
}

fn from_full_text(tree: &PageTree) -> Option<String> {
    let body = tree.joined_text("\n");
    let caps = STATUS_LINE_RE.captures(&body)?;
    let value = caps[1].trim();
    let line = value.split('\n').next().unwrap_or_default().trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
