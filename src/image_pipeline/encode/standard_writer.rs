use std::io::Write;

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, Frame, ImageEncoder, RgbaImage};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::encode::tiff_writer::write_tiff;
use crate::image_pipeline::encode::types::{ConversionConfig, TargetFormat};
use crate::image_pipeline::encode::writer::ImageWriter;
use crate::image_pipeline::heic::types::{DecodedImage, PixelMode};

/// Writes every [`TargetFormat`]: TIFF through the `tiff` crate, the rest
/// through the `image` codecs.
pub struct StandardImageWriter;

impl ImageWriter for StandardImageWriter {
    fn write_image(
        &self,
        image: &DecodedImage,
        format: TargetFormat,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()> {
        debug!("Encoding {} image: {}x{}", format, image.width, image.height);

        match format {
            TargetFormat::Jpg => write_jpeg(image, output, config.jpeg_quality),
            TargetFormat::Png => write_png(image, output),
            TargetFormat::Gif => write_gif(image, output),
            TargetFormat::Tiff => write_tiff(image, output, config),
        }
    }
}

fn encode_err(e: image::ImageError) -> ConversionError {
    ConversionError::EncodeError(e.to_string())
}

// JPEG has no alpha channel.
fn write_jpeg(image: &DecodedImage, output: &mut dyn Write, quality: u8) -> Result<()> {
    let rgb = image.rgb_bytes();
    JpegEncoder::new_with_quality(output, quality)
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(encode_err)
}

fn write_png(image: &DecodedImage, output: &mut dyn Write) -> Result<()> {
    let color = match image.mode {
        PixelMode::Rgb => ExtendedColorType::Rgb8,
        PixelMode::Rgba => ExtendedColorType::Rgba8,
    };
    PngEncoder::new(output)
        .write_image(&image.data, image.width, image.height, color)
        .map_err(encode_err)
}

fn write_gif(image: &DecodedImage, output: &mut dyn Write) -> Result<()> {
    let rgba = RgbaImage::from_raw(image.width, image.height, image.rgba_bytes().into_owned())
        .ok_or(ConversionError::InvalidDimensions(image.width, image.height))?;
    let mut encoder = GifEncoder::new(output);
    encoder.encode_frame(Frame::new(rgba)).map_err(encode_err)
}
