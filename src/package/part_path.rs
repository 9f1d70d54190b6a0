//! Relative paths of parts inside an extracted package

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Path of a part relative to the package root.
///
/// Always forward-slash separated, without a leading '/'.
/// Example: `word/document.xml`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartPath {
    path: String,
}

impl PartPath {
    /// Create a new PartPath from a string.
    ///
    /// Backslashes become '/', leading and trailing '/' are dropped.
    pub fn new(path: &str) -> Result<Self> {
        let normalized = path.trim().replace('\\', "/");
        let normalized = normalized.trim_matches('/');

        if normalized.is_empty() {
            return Err(Error::InvalidPartPath("empty path".into()));
        }

        if normalized.contains("//") {
            return Err(Error::InvalidPartPath(format!(
                "invalid path '{}': contains double slashes",
                path
            )));
        }

        if normalized.split('/').any(|seg| seg == "..") {
            return Err(Error::InvalidPartPath(format!(
                "invalid path '{}': escapes the package root",
                path
            )));
        }

        Ok(Self {
            path: normalized.to_string(),
        })
    }

    /// Build a part path from a filesystem path relative to the package root
    pub fn from_relative(rel: &Path) -> Result<Self> {
        let segments: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Self::new(&segments.join("/"))
    }

    pub(crate) fn from_static(path: &'static str) -> Self {
        Self { path: path.into() }
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Get the file name portion
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Location of this part under an extracted package directory
    pub fn to_fs_path(&self, root: &Path) -> PathBuf {
        self.path
            .split('/')
            .fold(root.to_path_buf(), |acc, seg| acc.join(seg))
    }
}

impl fmt::Display for PartPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl std::str::FromStr for PartPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartPath::new(s)
    }
}

/// Well-known part paths
pub mod well_known {
    use super::PartPath;

    pub fn document() -> PartPath {
        PartPath::from_static("word/document.xml")
    }

    pub fn footer1() -> PartPath {
        PartPath::from_static("word/footer1.xml")
    }

    pub fn header1() -> PartPath {
        PartPath::from_static("word/header1.xml")
    }

    pub fn footnotes() -> PartPath {
        PartPath::from_static("word/footnotes.xml")
    }

    pub fn endnotes() -> PartPath {
        PartPath::from_static("word/endnotes.xml")
    }

    /// Parts searched for placeholders; any of them may be absent
    pub fn candidate_parts() -> Vec<PartPath> {
        vec![document(), footer1(), header1(), footnotes(), endnotes()]
    }
}
