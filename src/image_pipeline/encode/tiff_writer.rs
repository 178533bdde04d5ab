use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::heic::types::{DecodedImage, PixelMode};
use crate::image_pipeline::encode::types::{ConversionConfig, TiffCompression};

/// Encodes `image` as a single-page 8-bit TIFF, keeping alpha when present.
pub fn write_tiff(image: &DecodedImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
    debug!("Encoding TIFF image: {}x{}", image.width, image.height);

    // TiffEncoder needs Seek, so encode into memory first.
    let mut buffer = Vec::new();

    let compression = match config.tiff_compression {
        TiffCompression::None => tiff::encoder::Compression::Uncompressed,
        TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
        TiffCompression::Deflate => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
    };

    {
        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        let written = match image.mode {
            PixelMode::Rgb => encoder.write_image::<tiff::encoder::colortype::RGB8>(
                image.width,
                image.height,
                &image.data,
            ),
            PixelMode::Rgba => encoder.write_image::<tiff::encoder::colortype::RGBA8>(
                image.width,
                image.height,
                &image.data,
            ),
        };
        written.map_err(|e| ConversionError::EncodeError(e.to_string()))?;
    }

    output.write_all(&buffer)?;

    debug!("TIFF encoding complete, {} bytes", buffer.len());
    Ok(())
}
