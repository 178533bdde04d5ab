//! Image writing module
//!
//! This module encodes decoded buffers to JPEG, PNG, GIF or TIFF.

mod writer;
mod standard_writer;
mod tiff_writer;
pub mod types;

pub use writer::ImageWriter;
pub use standard_writer::StandardImageWriter;
pub use tiff_writer::write_tiff;
pub use types::{TargetFormat, TiffCompression, ConversionConfig, ConversionConfigBuilder};
