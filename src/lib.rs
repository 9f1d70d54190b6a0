//! # docx-template
//!
//! Placeholder substitution for DOCX templates.
//!
//! ## Features
//!
//! - Finds placeholders even when Word split them over several runs
//! - Keeps run and paragraph formatting of the surrounding text
//! - Inline text with line breaks, or a list of lines expanded into paragraphs
//! - Searches the body, first header, first footer, footnotes and endnotes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use docx_template::{process_docx, Replacement};
//!
//! let mut values = HashMap::new();
//! values.insert("{name}".to_string(), Replacement::from("Ann Lee"));
//! values.insert("{address}".to_string(), Replacement::from("1 Main St\nSpringfield"));
//! values.insert("{items}".to_string(), Replacement::from(["Apples", "Pears"]));
//!
//! process_docx("template.docx", "filled.docx", &values)?;
//! ```

pub mod convert;
pub mod error;
pub mod package;
pub mod template;
pub mod xml;

pub use convert::{generate_docx, process_docx};
pub use error::{Error, Result};
pub use package::{extract, pack, PartPath, WorkDir};
pub use template::{replace_in_all_parts, replace_multiple, Replacement};
