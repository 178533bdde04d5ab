//! Pipeline conversions module
//!
//! This module contains the single-file HEIC conversion service.

mod converter;
mod heic_convert;
mod output_path;

#[cfg(test)]
mod tests;

pub use converter::ImageConverter;
pub use heic_convert::HeicConversionPipeline;
pub use output_path::output_path_for;
