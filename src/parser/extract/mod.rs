pub mod description;
pub mod links;
pub mod resources;
pub mod status;
pub mod title;

use std::fmt;

use super::tree::PageTree;
use crate::output::PageRecord;
use links::InvalidLinkLog;

/// One exported page plus the link problems found while reading it.
#[derive(Debug)]
pub struct ExtractedPage {
    pub record: PageRecord,
    pub invalid_links: InvalidLinkLog,
}

/// Why a page produced no row. Not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoStatus,
    NotFinalized(String),
    NoTitle,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoStatus => f.write_str("no page status"),
            SkipReason::NotFinalized(status) => write!(f, "status is {:?}", status),
            SkipReason::NoTitle => f.write_str("no title"),
        }
    }
}

/// Status gate first, then title, description and resources.
pub fn extract_all(tree: &PageTree) -> Result<ExtractedPage, SkipReason> {
    let status = status::status_of(tree).ok_or(SkipReason::NoStatus)?;
    if !status::is_finalized(Some(&status)) {
        return Err(SkipReason::NotFinalized(status));
    }

    let title = title::title_of(tree).ok_or(SkipReason::NoTitle)?;

    let mut invalid_links = InvalidLinkLog::new();
    let description = description::description_of(tree, &title.name, &mut invalid_links);
    let resources = resources::resources_of(tree, &title.name, &mut invalid_links);

    Ok(ExtractedPage {
        record: PageRecord::assemble(&title.name, &title.acronym, &description, &resources),
        invalid_links,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use links::{LinkIssue, LinkLocation};

    fn parse(fixture: &str) -> PageTree {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", fixture)).unwrap();
        PageTree::parse(&html)
    }

    #[test]
    fn widget_factory_page() {
        let page = extract_all(&parse("widget_factory")).unwrap();
        let r = &page.record;
        assert_eq!(r.display_name, "Widget Factory (WF)");
        assert_eq!(r.acronym, "WF");
        assert!(r.description.starts_with("A simple widget. Counts widgets produced per shift."));
        assert!(r.description.contains("See A:https://ex.com/a and the workbook ."));
        assert!(r.description.contains(" Method Sum completed units."));
        assert_eq!(
            r.resources,
            "Definition Logic - SQL:https://git.example.org/wf.sql;References - Internal:https://www.google.com/"
        );

        // The description walk only stops at a <div>, so it also reads the
        // resource paragraphs.
        assert!(r.description.ends_with("SQL::https://git.example.org/wf.sql Internal"));
        let found: Vec<_> = page
            .invalid_links
            .iter()
            .map(|l| (l.location, l.issue, l.link_text.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (LinkLocation::Description, LinkIssue::LocalOrInternal, "the workbook"),
                (LinkLocation::Description, LinkIssue::LocalOrInternal, "Internal"),
                (LinkLocation::Resources, LinkIssue::LocalOrInternal, "Internal"),
            ]
        );
    }

    #[test]
    fn draft_page_is_skipped() {
        let skipped = extract_all(&parse("draft_page")).unwrap_err();
        assert_eq!(skipped, SkipReason::NotFinalized("Draft".into()));
    }

    #[test]
    fn finalized_page_without_title_is_skipped() {
        assert_eq!(extract_all(&parse("no_title")).unwrap_err(), SkipReason::NoTitle);
    }

    #[test]
    fn page_without_status_is_skipped() {
        let tree = PageTree::parse(r#"<span id="title-text">Concept Definitions : X</span>"#);
        assert_eq!(extract_all(&tree).unwrap_err(), SkipReason::NoStatus);
    }

    #[test]
    fn status_from_plain_text() {
        let page = extract_all(&parse("status_in_text")).unwrap();
        assert_eq!(page.record.display_name, "Readmission Rate");
        assert_eq!(page.record.description, "Placeholder");
        assert_eq!(page.record.resources, "");
    }
}
