//! Package handling: extracted-part paths, zip transfer and working directories
//!
//! A DOCX package is unpacked once into a scoped working directory, its XML
//! parts are edited in place and the directory is packed back into a zip.

mod archive;
mod part_path;
mod workdir;

pub use archive::{extract, pack, RESERVED_PREFIX};
pub use part_path::{well_known, PartPath};
pub use workdir::{unique_output_name, unique_output_path, WorkDir};
