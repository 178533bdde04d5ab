use std::path::{Path, PathBuf};

use crate::image_pipeline::encode::TargetFormat;

/// `input_path` with its extension swapped for the format's canonical one.
///
/// Pure: the filesystem is never consulted, so an existing file at the
/// returned path will be overwritten by the conversion.
pub fn output_path_for(input_path: &Path, format: TargetFormat) -> PathBuf {
    input_path.with_extension(format.extension())
}
