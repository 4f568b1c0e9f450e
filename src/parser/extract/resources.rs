use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::links::{InvalidLinkLog, LinkCandidate, LinkLocation};
use crate::parser::tree::{Node, NodeKind, PageTree};

static RESOURCE_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Definition\sLogic|Related\sCodesets|References").unwrap());

/// Stands in for the URL of a local or internal resource.
pub const PLACEHOLDER_URL: &str = "https://www.google.com/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub heading: String,
    pub text: String,
    /// Empty when the link was local or internal.
    pub url: String,
}

impl fmt::Display for ResourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.url.is_empty() {
            write!(f, "\"{} - {}\":\"{}\"", self.heading, self.text, PLACEHOLDER_URL)
        } else {
            write!(f, "\"{} - {}\":{}", self.heading, self.text, self.url)
        }
    }
}

fn is_resource_heading(node: &Node) -> bool {
    matches!(node.kind(), NodeKind::Heading(2) | NodeKind::Heading(3))
        && node.sole_string().is_some_and(|s| RESOURCE_HEADING_RE.is_match(s))
}

/// Resource links under every matching heading, in document order.
///
/// Each heading's region ends at the next `h2` or at the last matching
/// heading. Only the last region can run to the end of the page, and an
/// earlier `h3` region can run through later matching `h3` headings, so a
/// paragraph may be read twice.
pub fn entries_of(tree: &PageTree, page_name: &str, log: &mut InvalidLinkLog) -> Vec<ResourceEntry> {
    let headings: Vec<Node> = tree.elements().filter(is_resource_heading).collect();
    let Some(&last) = headings.last() else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for heading in &headings {
        let heading_text = heading.text();
        let region = heading
            .next_siblings()
            .take_while(|n| n.kind() != NodeKind::Heading(2) && *n != last);

        for paragraph in region.filter(|n| n.kind() == NodeKind::Paragraph) {
            for anchor in paragraph.descendants().filter(|n| n.kind() == NodeKind::Anchor) {
                let Some(href) = anchor.attr("href") else {
                    continue;
                };
                let text = anchor.joined_text("");
                let text = text.trim_end_matches(':');

                let candidate = LinkCandidate::new(page_name, text, href, LinkLocation::Resources);
                let external = candidate.record(log);
                entries.push(ResourceEntry {
                    heading: heading_text.clone(),
                    text: candidate.text,
                    url: if external { href.to_string() } else { String::new() },
                });
            }
        }
    }
    entries
}

pub fn resources_of(tree: &PageTree, page_name: &str, log: &mut InvalidLinkLog) -> String {
    entries_of(tree, page_name, log)
        .iter()
        .map(ResourceEntry::to_string)
        .collect::<Vec<_>>()
        .join(";")
}
