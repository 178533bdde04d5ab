use std::path::PathBuf;

use crate::image_pipeline::batch::ConversionRequest;
use crate::image_pipeline::common::error::Result;

/// Converts one file and reports where the result was written.
pub trait ImageConverter {
    fn convert_request(&self, request: &ConversionRequest) -> Result<PathBuf>;
}
