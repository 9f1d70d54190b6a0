//! Error types for docx-template

use std::path::PathBuf;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML encoding error: {0}")]
    XmlEncoding(#[from] quick_xml::encoding::EncodingError),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Invalid part path: {0}")]
    InvalidPartPath(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Unsupported replacement: {0}")]
    UnsupportedReplacement(String),

    #[error("Failed to create working directory: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("Failed to extract '{}': {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to pack '{}': {source}", path.display())]
    Pack {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Error in part {part}: {source}")]
    Part {
        part: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Error replacing '{placeholder}': {source}")]
    Placeholder {
        placeholder: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap with the part being processed
    pub(crate) fn in_part(self, part: impl Into<String>) -> Self {
        Error::Part {
            part: part.into(),
            source: Box::new(self),
        }
    }

    /// Wrap with the placeholder being applied
    pub(crate) fn for_placeholder(self, placeholder: impl Into<String>) -> Self {
        Error::Placeholder {
            placeholder: placeholder.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
