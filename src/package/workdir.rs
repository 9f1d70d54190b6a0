//! Scoped working directories and output naming

use crate::error::{Error, Result};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

/// Exclusive temporary directory for one conversion.
///
/// The directory and everything in it is removed when the value is dropped,
/// on success and on every early return.
#[derive(Debug)]
pub struct WorkDir {
    dir: TempDir,
}

impl WorkDir {
    /// Create a fresh `docx_*` directory under the system temp location
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("docx_")
            .tempdir()
            .map_err(Error::TempDir)?;
        log::debug!("Created working directory {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl AsRef<Path> for WorkDir {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

/// File name for a generated package: `output_<unix nanos>_<random>.docx`
pub fn unique_output_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let suffix: u32 = rand::rng().random_range(0..10000);
    format!("output_{}_{}.docx", nanos, suffix)
}

/// Absolute path of a new unique output file in the current directory
pub fn unique_output_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(unique_output_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workdir_removed_on_drop() {
        let path = {
            let work = WorkDir::new().unwrap();
            std::fs::write(work.path().join("file.txt"), "x").unwrap();
            assert!(work.path().exists());
            work.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_workdir_removed_on_error_path() {
        fn failing(seen: &mut Option<PathBuf>) -> Result<()> {
            let work = WorkDir::new()?;
            *seen = Some(work.path().to_path_buf());
            Err(Error::InvalidDocument("boom".into()))
        }

        let mut seen = None;
        assert!(failing(&mut seen).is_err());
        assert!(!seen.unwrap().exists());
    }

    #[test]
    fn test_unique_output_name_shape() {
        let name = unique_output_name();
        assert!(name.starts_with("output_"));
        assert!(name.ends_with(".docx"));
        assert_eq!(name.matches('_').count(), 2);
    }

    #[test]
    fn test_unique_output_path_is_absolute() {
        assert!(unique_output_path().unwrap().is_absolute());
    }
}
