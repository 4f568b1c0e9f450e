pub mod extract;
pub mod tree;

use extract::{ExtractedPage, SkipReason};
use tree::{PageTree, RawDocument};

/// Two-step pipeline: HTML → tree → extracted page (or why it was skipped).
pub fn process_page(doc: &RawDocument) -> Result<ExtractedPage, SkipReason> {
    let tree = PageTree::parse(&doc.content);
    extract::extract_all(&tree)
}
