//! HEIC image reader implementation using libheif.
//!
//! The primary image of the container is decoded to 8-bit interleaved RGB, or
//! RGBA when the image carries an alpha plane. Thumbnails, depth maps and
//! auxiliary images are ignored.

use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::heic::reader::HeicReader;
use crate::image_pipeline::heic::types::{DecodedImage, PixelMode};

/// HEIC reader backed by the system libheif.
pub struct LibHeifReader;

impl HeicReader for LibHeifReader {
    fn read_heic(&self, data: &[u8]) -> Result<DecodedImage> {
        debug!("Decoding HEIC image, {} bytes", data.len());

        let lib_heif = LibHeif::new();
        let ctx = HeifContext::read_from_bytes(data)
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;
        let handle = ctx
            .primary_image_handle()
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let (mode, chroma) = if handle.has_alpha_channel() {
            (PixelMode::Rgba, RgbChroma::Rgba)
        } else {
            (PixelMode::Rgb, RgbChroma::Rgb)
        };

        let image = lib_heif
            .decode(&handle, ColorSpace::Rgb(chroma), None)
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let planes = image.planes();
        let plane = planes.interleaved.ok_or_else(|| {
            ConversionError::DecodeError("decoded image has no interleaved plane".to_string())
        })?;

        let width = plane.width;
        let height = plane.height;
        debug!("Decoded image: {}x{} {:?}, stride {}", width, height, mode, plane.stride);

        let pixels = pack_rows(plane.data, plane.stride, width, height, mode.channels())?;

        Ok(DecodedImage {
            mode,
            width,
            height,
            data: pixels,
        })
    }
}

/// Copies `height` rows of `width * channels` bytes out of a plane whose rows
/// start every `stride` bytes. libheif may pad rows, and the last row is allowed
/// to stop right after its pixels.
pub(crate) fn pack_rows(
    data: &[u8],
    stride: usize,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<Vec<u8>> {
    let row_len = width as usize * channels;
    if stride == 0 || stride < row_len {
        return Err(ConversionError::DecodeError(format!(
            "stride {} smaller than row of {} bytes",
            stride, row_len
        )));
    }

    let rows = height as usize;
    let mut pixels = Vec::with_capacity(row_len * rows);
    for (index, row) in data.chunks(stride).take(rows).enumerate() {
        let row = row.get(..row_len).ok_or_else(|| {
            ConversionError::DecodeError(format!(
                "row {} holds {} bytes, expected {}",
                index,
                row.len(),
                row_len
            ))
        })?;
        pixels.extend_from_slice(row);
    }

    if pixels.len() != row_len * rows {
        return Err(ConversionError::DecodeError(format!(
            "plane holds {} of {} rows",
            pixels.len() / row_len.max(1),
            rows
        )));
    }

    Ok(pixels)
}
