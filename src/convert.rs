//! End-to-end conversion: unpack a template, substitute placeholders, pack the result

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::package::{self, WorkDir};
use crate::template::{replace_multiple, Replacement};

/// Fill `template` with `replacements` and write the package to `output`.
///
/// The template is unpacked into a private working directory that is removed
/// before returning, whether the conversion succeeded or not.
pub fn process_docx<P, Q>(
    template: P,
    output: Q,
    replacements: &HashMap<String, Replacement>,
) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let template = template.as_ref();
    let output = output.as_ref();
    log::info!(
        "Filling {} ({} placeholder(s)) into {}",
        template.display(),
        replacements.len(),
        output.display()
    );

    let work = WorkDir::new()?;
    package::extract(template, work.path())?;
    replace_multiple(work.path(), replacements)?;
    package::pack(work.path(), output)?;

    log::info!("Wrote {}", output.display());
    Ok(())
}

/// Fill `template` into a new uniquely named file in the current directory,
/// returning its absolute path
pub fn generate_docx<P: AsRef<Path>>(
    template: P,
    replacements: &HashMap<String, Replacement>,
) -> Result<PathBuf> {
    let output = package::unique_output_path()?;
    process_docx(template, &output, replacements)?;
    Ok(output)
}
