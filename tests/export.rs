use std::fs;
use std::path::{Path, PathBuf};

use concept_scraper::{run, ExportError, RunSummary};
use tempfile::TempDir;

const FIXTURES: &[&str] = &[
    "draft_page.html",
    "no_title.html",
    "status_in_text.html",
    "widget_factory.html",
];

struct Workspace {
    _dir: TempDir,
    input: PathBuf,
    output: PathBuf,
    invalid: PathBuf,
}

fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("CD");
    fs::create_dir(&input).unwrap();
    for name in FIXTURES {
        fs::copy(Path::new("tests/fixtures").join(name), input.join(name)).unwrap();
    }
    fs::create_dir(input.join("attachments")).unwrap();

    Workspace {
        output: dir.path().join("definitions.csv"),
        invalid: dir.path().join("invalid-links.csv"),
        input,
        _dir: dir,
    }
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn exports_only_finalized_pages() {
    let ws = workspace();
    let summary = run(&ws.input, &ws.output, &ws.invalid).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            scanned: 4,
            exported: 2,
            skipped: 2,
            invalid_links: 3,
        }
    );

    let rows = lines(&ws.output);
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("\"Nick Name\",\"Name\",\"Definition\""));
    assert_eq!(
        rows[1],
        "\"\",\"Readmission Rate\",\"Placeholder\",\"true\",\"Draft\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"System Default;\""
    );
    assert!(rows[2].starts_with("\"\",\"Widget Factory (WF)\",\"A simple widget. "));
    assert!(rows[2].contains("Divide by \"\"scheduled\"\" shifts."));
    assert!(rows[2].ends_with(
        ",\"true\",\"Draft\",\"\",\"\",\"WF\",\"\",\"\",\"Definition Logic - SQL:https://git.example.org/wf.sql;References - Internal:https://www.google.com/\",\"\",\"System Default;\""
    ));
    assert!(!rows.iter().any(|r| r.contains("Bed Turnover") || r.contains("Untitled")));
}

#[test]
fn invalid_links_table() {
    let ws = workspace();
    run(&ws.input, &ws.output, &ws.invalid).unwrap();

    assert_eq!(
        lines(&ws.invalid),
        vec![
            "\"Page Name\",\"Link Text\",\"URL\",\"Location\",\"Issue\"",
            "\"Widget Factory (WF)\",\"the workbook\",\"attachments/123/wf.xlsx\",\"Description\",\"Local or Internal File\"",
            "\"Widget Factory (WF)\",\"Internal\",\"/display/CD/Shift+Calendar\",\"Description\",\"Local or Internal File\"",
            "\"Widget Factory (WF)\",\"Internal\",\"/display/CD/Shift+Calendar\",\"Resources\",\"Local or Internal File\"",
        ]
    );
}

#[test]
fn reruns_are_byte_identical() {
    let ws = workspace();
    run(&ws.input, &ws.output, &ws.invalid).unwrap();
    let first = (fs::read(&ws.output).unwrap(), fs::read(&ws.invalid).unwrap());
    run(&ws.input, &ws.output, &ws.invalid).unwrap();
    let second = (fs::read(&ws.output).unwrap(), fs::read(&ws.invalid).unwrap());
    assert_eq!(first, second);
}

#[test]
fn empty_directory_writes_headers_only() {
    let ws = workspace();
    let empty = ws.input.join("attachments");
    let summary = run(&empty, &ws.output, &ws.invalid).unwrap();
    assert_eq!(summary, RunSummary::default());
    assert_eq!(lines(&ws.output).len(), 1);
    assert_eq!(lines(&ws.invalid).len(), 1);
}

#[test]
fn unwritable_output_fails_the_run() {
    let ws = workspace();
    let err = run(&ws.input, &ws.input.join("nope").join("out.csv"), &ws.invalid).unwrap_err();
    assert!(matches!(err, ExportError::OpenOutput { .. }));
}
