use std::path::PathBuf;

use clap::Parser;

use crate::image_pipeline::{ConversionConfig, TiffCompression};

#[derive(Parser, Debug, Clone)]
#[command(name = "heic_converter_rs", version, about = "Convert HEIC images to JPEG, PNG, GIF or TIFF")]
pub struct Cli {
    /// HEIC files to convert, in order. Starts the interactive menu when empty.
    pub paths: Vec<PathBuf>,

    /// Target format: jpg, png, gif or tiff
    #[arg(short, long, default_value = "jpg")]
    pub format: String,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = 75, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// TIFF compression
    #[arg(long, value_enum, default_value_t = TiffCompression::None)]
    pub tiff_compression: TiffCompression,

    /// Write outputs in place instead of via a temporary file
    #[arg(long)]
    pub no_atomic: bool,

    /// Open each converted file with the default viewer afterwards
    #[arg(long)]
    pub open: bool,

    /// Program used to open files instead of the system default
    #[arg(long, value_name = "PROGRAM")]
    pub open_with: Option<String>,

    /// Force the interactive menu even when paths are given
    #[arg(short, long)]
    pub interactive: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn conversion_config(&self) -> ConversionConfig {
        ConversionConfig::builder()
            .jpeg_quality(self.quality)
            .tiff_compression(self.tiff_compression)
            .atomic_write(!self.no_atomic)
            .build()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive || self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["heic_converter_rs"]);
        assert!(cli.is_interactive());
        assert_eq!(cli.format, "jpg");

        let config = cli.conversion_config();
        assert_eq!(config.jpeg_quality, 75);
        assert_eq!(config.tiff_compression, TiffCompression::None);
        assert!(config.atomic_write);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "heic_converter_rs", "a.HEIC", "b.HEIC", "-f", "tiff", "-q", "90",
            "--tiff-compression", "lzw", "--no-atomic", "--open",
        ]);
        assert!(!cli.is_interactive());
        assert_eq!(cli.paths, vec![PathBuf::from("a.HEIC"), PathBuf::from("b.HEIC")]);

        let config = cli.conversion_config();
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.tiff_compression, TiffCompression::Lzw);
        assert!(!config.atomic_write);
        assert!(cli.open);
        assert_eq!(cli.open_with, None);
    }

    #[test]
    fn test_compression_names() {
        for (name, expected) in [
            ("none", TiffCompression::None),
            ("lzw", TiffCompression::Lzw),
            ("deflate", TiffCompression::Deflate),
        ] {
            let cli = Cli::parse_from(["heic_converter_rs", "--tiff-compression", name]);
            assert_eq!(cli.conversion_config().tiff_compression, expected);
        }
    }

    #[test]
    fn test_open_with() {
        let cli = Cli::parse_from(["heic_converter_rs", "a.HEIC", "--open", "--open-with", "feh"]);
        assert_eq!(cli.open_with.as_deref(), Some("feh"));
    }

    #[test]
    fn test_rejects_bad_quality_and_compression() {
        assert!(Cli::try_parse_from(["heic_converter_rs", "-q", "0"]).is_err());
        let err = Cli::try_parse_from(["heic_converter_rs", "--tiff-compression", "zstd"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
