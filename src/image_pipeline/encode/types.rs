//! Output format and conversion configuration types

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::ConversionError;

/// Formats a HEIC image can be converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetFormat {
    #[default]
    Jpg,
    Png,
    Gif,
    Tiff,
}

impl TargetFormat {
    pub const ALL: [TargetFormat; 4] = [
        TargetFormat::Jpg,
        TargetFormat::Png,
        TargetFormat::Gif,
        TargetFormat::Tiff,
    ];

    /// Extension written on output files
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Jpg => "jpg",
            TargetFormat::Png => "png",
            TargetFormat::Gif => "gif",
            TargetFormat::Tiff => "tiff",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TargetFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(TargetFormat::Jpg),
            "png" => Ok(TargetFormat::Png),
            "gif" => Ok(TargetFormat::Gif),
            "tiff" | "tif" => Ok(TargetFormat::Tiff),
            _ => Err(ConversionError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - balanced level
    Deflate,
}

/// Configuration for HEIC conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
    /// Compression used when writing TIFF
    pub tiff_compression: TiffCompression,
    /// Whether to validate image dimensions before encoding
    pub validate_dimensions: bool,
    /// Reject images whose width or height exceeds this
    pub max_dimension: Option<u32>,
    /// Write to a temporary file and rename it over the output on success
    pub atomic_write: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 75,
            tiff_compression: TiffCompression::None,
            validate_dimensions: true,
            max_dimension: None,
            atomic_write: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    jpeg_quality: Option<u8>,
    tiff_compression: Option<TiffCompression>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
    atomic_write: Option<bool>,
}

impl ConversionConfigBuilder {
    /// Clamped to 1-100.
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality.clamp(1, 100));
        self
    }

    pub fn tiff_compression(mut self, compression: TiffCompression) -> Self {
        self.tiff_compression = Some(compression);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn atomic_write(mut self, enable: bool) -> Self {
        self.atomic_write = Some(enable);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            tiff_compression: self.tiff_compression.unwrap_or(default.tiff_compression),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            atomic_write: self.atomic_write.unwrap_or(default.atomic_write),
        }
    }
}
