//! Row assembly and the two CSV tables written at the end of a run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ExportError, Result};
use crate::parser::extract::links::InvalidLink;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub const PAGE_HEADER: [&str; 13] = [
    "Nick Name",
    "Name",
    "Definition",
    "IsDefinitionRichText",
    "Status",
    "Related Terms",
    "Synonyms",
    "Acronym",
    "Experts",
    "Stewards",
    "Resources",
    "Parent Term Name",
    "Term Template Names",
];

pub const INVALID_LINK_HEADER: [&str; 5] = ["Page Name", "Link Text", "URL", "Location", "Issue"];

const RICH_TEXT: &str = "true";
const EXPORT_STATUS: &str = "Draft";
const TEMPLATE_NAMES: &str = "System Default;";

/// One glossary term, fields already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub display_name: String,
    pub acronym: String,
    pub description: String,
    pub resources: String,
}

impl PageRecord {
    /// Quotes in the description survive (doubled on write); quotes in the
    /// resources field are dropped.
    pub fn assemble(name: &str, acronym: &str, description: &str, resources: &str) -> Self {
        PageRecord {
            display_name: normalize(name),
            acronym: normalize(acronym),
            description: normalize(description),
            resources: normalize(&resources.replace('"', "")),
        }
    }

    pub fn columns(&self) -> [&str; 13] {
        [
            "",
            &self.display_name,
            &self.description,
            RICH_TEXT,
            EXPORT_STATUS,
            "",
            "",
            &self.acronym,
            "",
            "",
            &self.resources,
            "",
            TEMPLATE_NAMES,
        ]
    }
}

/// Drop newlines, then collapse every whitespace run to one space.
pub fn normalize(s: &str) -> String {
    WHITESPACE_RE.replace_all(&s.replace('\n', ""), " ").into_owned()
}

pub fn invalid_link_columns(link: &InvalidLink) -> [String; 5] {
    [
        normalize(&link.page_name),
        normalize(&link.link_text),
        normalize(&link.link_url),
        link.location.to_string(),
        link.issue.to_string(),
    ]
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Fully quoted CSV sink. Every field is wrapped in quotes, embedded quotes
/// are doubled, rows end with `\n`.
pub struct CsvTable<W: Write> {
    out: W,
    path: PathBuf,
}

impl CsvTable<BufWriter<File>> {
    /// Create (or truncate) `path` and write the header.
    pub fn create(path: &Path, header: &[&str]) -> Result<Self> {
        let file = File::create(path).map_err(|source| ExportError::OpenOutput {
            path: path.to_path_buf(),
            source,
        })?;
        let mut table = CsvTable::new(BufWriter::new(file), path);
        table.write_row(header)?;
        Ok(table)
    }
}

impl<W: Write> CsvTable<W> {
    pub fn new(out: W, path: &Path) -> Self {
        CsvTable {
            out,
            path: path.to_path_buf(),
        }
    }

    pub fn write_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        let line = fields
            .iter()
            .map(|f| quote(f.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(self.out, "{}", line).map_err(|source| self.write_error(source))
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush().map_err(|source| self.write_error(source))?;
        Ok(self.out)
    }

    fn write_error(&self, source: std::io::Error) -> ExportError {
        ExportError::WriteOutput {
            path: self.path.clone(),
            source,
        }
    }
}
