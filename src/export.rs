use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::error::{ExportError, Result};
use crate::output::{invalid_link_columns, CsvTable, INVALID_LINK_HEADER, PAGE_HEADER};
use crate::parser::extract::links::InvalidLinkLog;
use crate::parser::process_page;
use crate::parser::tree::RawDocument;

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: usize,
    pub exported: usize,
    pub skipped: usize,
    pub invalid_links: usize,
}

impl RunSummary {
    pub fn print(&self) {
        println!(
            "Scanned {} pages: {} exported, {} skipped, {} invalid links.",
            self.scanned, self.exported, self.skipped, self.invalid_links,
        );
    }
}

/// Convert every regular file in `input_dir` and write both tables.
///
/// Both destinations are opened before any page is read, so an unwritable
/// path fails the run up front.
pub fn run(input_dir: &Path, output_path: &Path, invalid_path: &Path) -> Result<RunSummary> {
    if !input_dir.is_dir() {
        return Err(ExportError::MissingInput(input_dir.to_path_buf()));
    }

    let files = list_documents(input_dir)?;
    info!(input = ?input_dir, files = files.len(), "starting export");

    let mut pages = CsvTable::create(output_path, &PAGE_HEADER)?;
    let mut invalid = CsvTable::create(invalid_path, &INVALID_LINK_HEADER)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut summary = RunSummary::default();
    let mut log = InvalidLinkLog::new();

    for path in &files {
        let doc = read_document(path)?;
        summary.scanned += 1;
        pb.set_message(doc.file_name());

        match process_page(&doc) {
            Ok(page) => {
                pages.write_row(&page.record.columns())?;
                summary.exported += 1;
                log.append(page.invalid_links);
            }
            Err(reason) => {
                debug!(file = %doc.file_name(), %reason, "skipped");
                summary.skipped += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    for link in log.iter() {
        invalid.write_row(&invalid_link_columns(link))?;
    }
    summary.invalid_links = log.len();

    pages.finish()?;
    invalid.finish()?;

    info!(
        exported = summary.exported,
        skipped = summary.skipped,
        invalid_links = summary.invalid_links,
        output = ?output_path,
        invalid = ?invalid_path,
        "export finished"
    );
    Ok(summary)
}

/// Regular files (symlinks followed), sorted by name so reruns are identical.
fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let list_error = |source: std::io::Error| ExportError::ListInput {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!(path = ?path, "not a regular file");
        }
    }
    files.sort();
    Ok(files)
}

fn read_document(path: &Path) -> Result<RawDocument> {
    let content = fs::read_to_string(path).map_err(|source| ExportError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(RawDocument::new(path, content))
}
