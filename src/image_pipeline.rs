//! Image processing pipeline module
//!
//! This module provides HEIC decoding, encoding to common raster formats,
//! the single-file conversion service and the batch orchestrator on top of it.

pub mod heic;
pub mod encode;
pub mod conversions;
pub mod batch;
pub mod common;

pub use common::{
    ConversionError,
    FailureKind,
    Result,
};

pub use heic::{
    DecodedImage,
    PixelMode,
    HeicReader,
    LibHeifReader,
};

pub use encode::{
    TargetFormat,
    TiffCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    ImageWriter,
    StandardImageWriter,
};

pub use conversions::{
    HeicConversionPipeline,
    ImageConverter,
    output_path_for,
};

pub use batch::{
    BatchNotice,
    BatchOrchestrator,
    BatchState,
    CancelFlag,
    ConversionRequest,
    ConversionResult,
    NoticeSink,
    Progress,
    ProgressSink,
};
