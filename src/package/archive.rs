//! Archive transfer: unpack a package to a directory and pack it back

use crate::error::{Error, Result};
use crate::package::PartPath;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use walkdir::WalkDir;
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// Prefix of packaging-tool metadata entries that are never packed
pub const RESERVED_PREFIX: &str = "__";

/// Extract every entry of the package at `src` under `dest`
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> Result<()> {
    let src = src.as_ref();
    extract_entries(src, dest.as_ref()).map_err(|e| Error::Extract {
        path: src.to_path_buf(),
        source: Box::new(e),
    })
}

/// Pack the directory `source` into a new package at `target`.
///
/// The package is staged next to `target` and moved into place only once
/// complete; on failure `target` is left as it was.
pub fn pack<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q) -> Result<()> {
    let target = target.as_ref();
    pack_entries(source.as_ref(), target).map_err(|e| Error::Pack {
        path: target.to_path_buf(),
        source: Box::new(e),
    })
}

fn extract_entries(src: &Path, dest: &Path) -> Result<()> {
    let file = File::open(src)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let Some(rel) = entry.enclosed_name() else {
            return Err(Error::InvalidPartPath(format!(
                "entry '{}' escapes the package root",
                entry.name()
            )));
        };
        let path = dest.join(&rel);

        if entry.is_dir() {
            fs::create_dir_all(&path)?;
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&path)?;
        io::copy(&mut entry, &mut out)?;
    }

    log::debug!(
        "Extracted {} entries from {} to {}",
        archive.len(),
        src.display(),
        dest.display()
    );
    Ok(())
}

fn pack_entries(source: &Path, target: &Path) -> Result<()> {
    let staging_dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = tempfile::Builder::new()
        .prefix(".docx_pack_")
        .tempfile_in(staging_dir)?;

    let mut zip = ZipWriter::new(staged);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut count = 0usize;
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| Error::InvalidPartPath(entry.path().display().to_string()))?;

        // Skip the root itself
        if rel.as_os_str().is_empty() {
            continue;
        }

        let name = PartPath::from_relative(rel)?;
        if name.as_str().starts_with(RESERVED_PREFIX) {
            continue;
        }

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", name), stored)?;
        } else {
            zip.start_file(name.as_str(), deflated)?;
            let mut file = File::open(entry.path())?;
            io::copy(&mut file, &mut zip)?;
        }
        count += 1;
    }

    let staged = zip.finish()?;
    staged.persist(target).map_err(|e| e.error)?;
    log::debug!(
        "Packed {} entries from {} into {}",
        count,
        source.display(),
        target.display()
    );
    Ok(())
}
