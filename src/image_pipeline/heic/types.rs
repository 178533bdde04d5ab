//! Decoded image types

use std::borrow::Cow;

/// Channel layout of a decoded buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    /// 3 bytes per pixel [R, G, B]
    Rgb,
    /// 4 bytes per pixel [R, G, B, A]
    Rgba,
}

impl PixelMode {
    pub fn channels(self) -> usize {
        match self {
            PixelMode::Rgb => 3,
            PixelMode::Rgba => 4,
        }
    }
}

/// Represents a decoded HEIC primary image
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Channel layout of `data`
    pub mode: PixelMode,
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// Tightly packed interleaved pixels, row-major, no row padding
    pub data: Vec<u8>,
}

impl DecodedImage {
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.mode.channels()
    }

    /// Pixels as RGB, dropping alpha when present.
    pub fn rgb_bytes(&self) -> Cow<'_, [u8]> {
        match self.mode {
            PixelMode::Rgb => Cow::Borrowed(&self.data),
            PixelMode::Rgba => Cow::Owned(
                self.data
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect(),
            ),
        }
    }

    /// Pixels as RGBA, filling alpha with 255 when absent.
    pub fn rgba_bytes(&self) -> Cow<'_, [u8]> {
        match self.mode {
            PixelMode::Rgba => Cow::Borrowed(&self.data),
            PixelMode::Rgb => Cow::Owned(
                self.data
                    .chunks_exact(3)
                    .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
                    .collect(),
            ),
        }
    }
}
