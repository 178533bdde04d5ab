//! HEIC image reading module
//!
//! This module turns HEIF containers into interleaved 8-bit pixel buffers.

mod reader;
mod libheif_reader;
pub mod types;

pub use reader::HeicReader;
pub use libheif_reader::LibHeifReader;
pub use types::{DecodedImage, PixelMode};
