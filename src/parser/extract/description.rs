use std::collections::HashSet;

use super::links::{InvalidLinkLog, LinkCandidate, LinkLocation};
use crate::parser::tree::{Node, NodeKind, PageTree, Visit};

pub const PLACEHOLDER: &str = "Placeholder";

const HEADING: &str = "Description";

/// Sub-section headings kept inline in the description, each at most once.
const SECTION_LABELS: &[&str] = &["Background/Context", "Method", "Limitations"];

pub fn description_of(tree: &PageTree, page_name: &str, log: &mut InvalidLinkLog) -> String {
    let Some(heading) = tree
        .elements()
        .find(|n| n.kind() == NodeKind::Heading(2) && n.sole_string() == Some(HEADING))
    else {
        return PLACEHOLDER.to_string();
    };

    let mut fragments = Vec::new();
    let mut seen_labels = HashSet::new();

    for node in heading.next_siblings() {
        let kind = node.kind();
        if kind == NodeKind::Division {
            break;
        }
        if !matches!(
            kind,
            NodeKind::Paragraph | NodeKind::List | NodeKind::ListItem | NodeKind::Bold | NodeKind::Heading(2)
        ) {
            continue;
        }

        let text = flatten(&node, page_name, log);

        if kind == NodeKind::Heading(2) {
            let label = node.sole_string().filter(|s| SECTION_LABELS.contains(s));
            if let Some(label) = label {
                if seen_labels.insert(label) {
                    fragments.push(text);
                }
            }
            continue;
        }

        if !text.is_empty() {
            fragments.push(text);
        }
    }

    fragments.join(" ").trim().to_string()
}

/// Node text with footnote markers dropped and links rewritten in place.
fn flatten(node: &Node, page_name: &str, log: &mut InvalidLinkLog) -> String {
    node.joined_text_with(" ", &mut |el| match el.kind() {
        NodeKind::Superscript => Visit::Skip,
        NodeKind::Anchor => match el.attr("href") {
            Some(href) => {
                let candidate = LinkCandidate::new(page_name, link_text(el), href, LinkLocation::Description);
                candidate.record(log);
                Visit::Replace(candidate.rewritten())
            }
            None => Visit::Descend,
        },
        _ => Visit::Descend,
    })
}

fn link_text(anchor: &Node) -> String {
    anchor.joined_text_with("", &mut |el| match el.kind() {
        NodeKind::Superscript => Visit::Skip,
        _ => Visit::Descend,
    })
}
