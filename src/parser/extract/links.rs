use std::fmt;

/// Which region of the page a link was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkLocation {
    Description,
    Resources,
}

impl fmt::Display for LinkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LinkLocation::Description => "Description",
            LinkLocation::Resources => "Resources",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkIssue {
    NameMatchesUrl,
    LocalOrInternal,
}

impl fmt::Display for LinkIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LinkIssue::NameMatchesUrl => "Link Name URL Match",
            LinkIssue::LocalOrInternal => "Local or Internal File",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLink {
    pub page_name: String,
    pub link_text: String,
    pub link_url: String,
    pub location: LinkLocation,
    pub issue: LinkIssue,
}

/// Append-only record of every failed check, in the order they were made.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvalidLinkLog {
    entries: Vec<InvalidLink>,
}

impl InvalidLinkLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, link: InvalidLink) {
        self.entries.push(link);
    }

    pub fn append(&mut self, other: InvalidLinkLog) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InvalidLink> {
        self.entries.iter()
    }
}

/// A link found while walking a page region.
#[derive(Debug, Clone)]
pub struct LinkCandidate<'a> {
    pub page_name: &'a str,
    pub text: String,
    pub url: String,
    pub location: LinkLocation,
}

impl<'a> LinkCandidate<'a> {
    pub fn new(page_name: &'a str, text: impl Into<String>, url: impl Into<String>, location: LinkLocation) -> Self {
        LinkCandidate {
            page_name,
            text: text.into(),
            url: url.into(),
            location,
        }
    }

    pub fn is_external(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }

    /// Failed checks, name match first. The two checks are independent.
    pub fn issues(&self) -> Vec<LinkIssue> {
        let mut issues = Vec::new();
        if self.text == self.url {
            issues.push(LinkIssue::NameMatchesUrl);
        }
        if !self.is_external() {
            issues.push(LinkIssue::LocalOrInternal);
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }

    /// Log every failed check. Returns whether the URL is external.
    pub fn record(&self, log: &mut InvalidLinkLog) -> bool {
        for issue in self.issues() {
            tracing::debug!(
                page = self.page_name,
                url = %self.url,
                location = %self.location,
                issue = %issue,
                "invalid link"
            );
            log.push(InvalidLink {
                page_name: self.page_name.to_string(),
                link_text: self.text.clone(),
                link_url: self.url.clone(),
                location: self.location,
                issue,
            });
        }
        self.is_external()
    }

    /// Replacement text inside a description.
    pub fn rewritten(&self) -> String {
        if !self.is_external() {
            self.text.clone()
        } else if self.text == self.url {
            self.url.clone()
        } else {
            format!("{}:{}", self.text, self.url)
        }
    }
}
