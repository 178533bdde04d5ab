use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;
use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    batch::ConversionRequest,
    common::error::{ConversionError, Result},
    conversions::{ImageConverter, output_path_for},
    encode::{ConversionConfig, ImageWriter, StandardImageWriter, TargetFormat},
    heic::{DecodedImage, HeicReader, LibHeifReader},
};

pub struct HeicConversionPipeline<R: HeicReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl HeicConversionPipeline<LibHeifReader, StandardImageWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: LibHeifReader,
            writer: StandardImageWriter,
            config,
        }
    }
}

impl<R: HeicReader, W: ImageWriter> HeicConversionPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate(&self, image: &DecodedImage) -> Result<()> {
        // Encoders assume a tight buffer, so this check is not optional.
        if image.data.len() != image.expected_len() {
            return Err(ConversionError::DecodeError(format!(
                "pixel buffer holds {} bytes, expected {} for {}x{} {:?}",
                image.data.len(),
                image.expected_len(),
                image.width,
                image.height,
                image.mode
            )));
        }

        if !self.config.validate_dimensions {
            return Ok(());
        }

        if image.width == 0 || image.height == 0 {
            return Err(ConversionError::InvalidDimensions(image.width, image.height));
        }

        if let Some(max) = self.config.max_dimension {
            if image.width > max || image.height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    image.width, image.height, max
                );
                return Err(ConversionError::InvalidDimensions(image.width, image.height));
            }
        }

        Ok(())
    }

    fn decode(&self, input_data: &[u8]) -> Result<DecodedImage> {
        let image = {
            let _span = tracing::info_span!("decode_heic").entered();
            self.reader.read_heic(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = image.width,
                height = image.height
            ).entered();
            self.validate(&image)?;
        }

        Ok(image)
    }

    fn encode(&self, image: &DecodedImage, format: TargetFormat, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode", format = %format).entered();
        self.writer.write_image(image, format, output, &self.config)
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], format: TargetFormat, output: &mut dyn Write) -> Result<()> {
        info!("Starting HEIC to {} conversion", format);

        let image = self.decode(input_data)?;
        self.encode(&image, format, output)?;

        info!(
            width = image.width,
            height = image.height,
            "Conversion complete"
        );
        Ok(())
    }

    /// Converts `input_path` next to itself and returns the written path.
    ///
    /// The output is only opened once the source decoded cleanly.
    #[instrument(skip(self, input_path))]
    pub fn convert_file<P: AsRef<Path>>(&self, input_path: P, format: TargetFormat) -> Result<PathBuf> {
        let input_path = input_path.as_ref();
        let output_path = output_path_for(input_path, format);

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let image = self.decode(&input_data)?;

        {
            let _span = tracing::info_span!("write_output", atomic = self.config.atomic_write).entered();
            if self.config.atomic_write {
                self.write_atomic(&image, format, &output_path)?;
            } else {
                self.write_in_place(&image, format, &output_path)?;
            }
        }

        info!(
            output = %output_path.display(),
            width = image.width,
            height = image.height,
            "Conversion complete"
        );
        Ok(output_path)
    }

    fn write_in_place(&self, image: &DecodedImage, format: TargetFormat, output_path: &Path) -> Result<()> {
        let file = File::create(output_path).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;
        let mut output = BufWriter::new(file);
        self.encode(image, format, &mut output)?;
        output.flush()?;
        Ok(())
    }

    // The temp file lives beside the output so the final rename stays on one filesystem.
    fn write_atomic(&self, image: &DecodedImage, format: TargetFormat, output_path: &Path) -> Result<()> {
        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Opened like File::create so the mode follows the umask, not tempfile's 0600.
        let mut temp = Builder::new()
            .prefix(".heic-convert")
            .make_in(dir, |path| {
                OpenOptions::new().write(true).create_new(true).open(path)
            })
            .map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;

        {
            let mut output = BufWriter::new(temp.as_file_mut());
            self.encode(image, format, &mut output)?;
            output.flush()?;
        }

        temp.persist(output_path).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e.error))
        })?;
        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

impl<R: HeicReader, W: ImageWriter> ImageConverter for HeicConversionPipeline<R, W> {
    fn convert_request(&self, request: &ConversionRequest) -> Result<PathBuf> {
        self.convert_file(request.input_path(), request.target_format())
    }
}
