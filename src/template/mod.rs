//! Placeholder substitution inside WordprocessingML parts
//!
//! A placeholder may be split over several runs by Word (spell checking,
//! revision marks, partial formatting). The [`locate`] step works on the
//! concatenated text of a paragraph and maps the match back onto the `<w:t>`
//! nodes it covers; the rewriter then edits only those nodes, so formatting of
//! everything around the placeholder survives.

mod locator;
mod orchestrator;
mod replacement;
mod rewriter;

pub use locator::{locate, paragraph_text, text_nodes, SpanMatch, TextSpan};
pub use orchestrator::{
    replace_in_all_parts, replace_in_document, replace_in_part, replace_in_parts,
    replace_in_xml, replace_multiple,
};
pub use replacement::Replacement;
pub use rewriter::{normalize_preserved_empty, rewrite_inline, rewrite_lines};
