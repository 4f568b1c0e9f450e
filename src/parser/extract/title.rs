use std::sync::LazyLock;

use regex::Regex;

use crate::parser::tree::PageTree;

static ACRONYM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([A-Z]+)\)").unwrap());

const TITLE_TAG: &str = "span";
const TITLE_ID: &str = "title-text";
const SPACE_PREFIX: &str = "Concept Definitions :";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub name: String,
    pub acronym: String,
}

pub fn title_of(tree: &PageTree) -> Option<Title> {
    let raw = tree.find_by_id(TITLE_TAG, TITLE_ID)?.text();
    let name = raw.trim().replace(SPACE_PREFIX, "");
    let name = name.trim();

    // Before punctuation stripping: "(W.F.)" must not turn into "(WF)".
    let acronym = ACRONYM_RE
        .captures(name)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    let name: String = name.chars().filter(|c| !matches!(c, '\n' | '.' | '@')).collect();
    if name.is_empty() {
        return None;
    }

    Some(Title { name, acronym })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(html: &str) -> Option<Title> {
        title_of(&PageTree::parse(html))
    }

    #[test]
    fn prefix_and_acronym() {
        let t = title(r#"<span id="title-text"> Concept Definitions : Widget Factory (WF) </span>"#).unwrap();
        assert_eq!(t.name, "Widget Factory (WF)");
        assert_eq!(t.acronym, "WF");
    }

    #[test]
    fn punctuation_removed_after_acronym() {
        let t = title(r#"<span id="title-text">Concept Definitions : U.S. Rate @Home (W.F.)</span>"#).unwrap();
        assert_eq!(t.name, "US Rate Home (WF)");
        assert_eq!(t.acronym, "");
    }

    #[test]
    fn first_acronym_wins() {
        let t = title(r#"<span id="title-text">Length of Stay (LOS) per Visit (LOSV)</span>"#).unwrap();
        assert_eq!(t.acronym, "LOS");
    }

    #[test]
    fn lowercase_parentheses_are_not_acronyms() {
        let t = title(r#"<span id="title-text">Rate (per day)</span>"#).unwrap();
        assert_eq!(t.acronym, "");
    }

    #[test]
    fn nested_markup_and_newlines() {
        let t = title("<span id=\"title-text\"><a href=\"#\">Concept Definitions : Readmit\nRate</a></span>").unwrap();
        assert_eq!(t.name, "ReadmitRate");
    }

    #[test]
    fn missing_or_empty_title() {
        assert_eq!(title("<h1>Concept Definitions : X</h1>"), None);
        assert_eq!(title(r#"<span id="title-text">Concept Definitions : ...</span>"#), None);
    }
}
