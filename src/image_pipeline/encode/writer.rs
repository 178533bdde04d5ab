use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::heic::types::DecodedImage;
use crate::image_pipeline::encode::types::{ConversionConfig, TargetFormat};

pub trait ImageWriter {
    fn write_image(
        &self,
        image: &DecodedImage,
        format: TargetFormat,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()>;
}
