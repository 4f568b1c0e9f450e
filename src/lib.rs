//! Confluence concept-definition export → glossary import CSV.
//!
//! Pipeline per file: raw HTML → tolerant tree → status gate → title,
//! description and resources → one CSV row. Links that fail validation are
//! collected into a second CSV.

pub mod config;
pub mod error;
pub mod export;
pub mod output;
pub mod parser;

pub use error::{ExportError, Result};
pub use export::{run, RunSummary};
