#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use crate::image_pipeline::batch::ConversionRequest;
    use crate::image_pipeline::common::error::{ConversionError, Result};
    use crate::image_pipeline::conversions::{HeicConversionPipeline, ImageConverter};
    use crate::image_pipeline::encode::{ConversionConfig, ImageWriter, StandardImageWriter, TargetFormat};
    use crate::image_pipeline::heic::{DecodedImage, HeicReader, PixelMode};

    const CORRUPT: &[u8] = b"corrupt";

    struct MockReader {
        mock_data: Option<DecodedImage>,
    }

    impl MockReader {
        fn square(size: u32) -> Self {
            Self {
                mock_data: Some(DecodedImage {
                    mode: PixelMode::Rgb,
                    width: size,
                    height: size,
                    data: vec![128u8; (size * size * 3) as usize],
                }),
            }
        }
    }

    impl HeicReader for MockReader {
        fn read_heic(&self, data: &[u8]) -> Result<DecodedImage> {
            if data == CORRUPT {
                return Err(ConversionError::DecodeError("Mock decode error".to_string()));
            }
            Ok(self.mock_data.clone().unwrap_or(DecodedImage {
                mode: PixelMode::Rgb,
                width: 100,
                height: 100,
                data: vec![0u8; 100 * 100 * 3],
            }))
        }
    }

    struct MockWriter {
        should_fail: bool,
        written: Arc<Mutex<Vec<(u32, u32, TargetFormat)>>>,
    }

    impl MockWriter {
        fn new(should_fail: bool) -> Self {
            Self { should_fail, written: Arc::new(Mutex::new(Vec::new())) }
        }
    }

    impl ImageWriter for MockWriter {
        fn write_image(
            &self,
            image: &DecodedImage,
            format: TargetFormat,
            output: &mut dyn Write,
            _config: &ConversionConfig,
        ) -> Result<()> {
            // Emit a few bytes first so a failure mid-write is observable.
            output.write_all(b"partial")?;
            if self.should_fail {
                return Err(ConversionError::EncodeError("Mock encode error".to_string()));
            }
            self.written.lock().unwrap().push((image.width, image.height, format));
            Ok(())
        }
    }

    fn real_pipeline(config: ConversionConfig) -> HeicConversionPipeline<MockReader, StandardImageWriter> {
        HeicConversionPipeline::with_custom(MockReader::square(100), StandardImageWriter, config)
    }

    fn dir_entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_successful_conversion() {
        let writer = MockWriter::new(false);
        let written = writer.written.clone();
        let pipeline = HeicConversionPipeline::with_custom(
            MockReader { mock_data: None },
            writer,
            ConversionConfig::default(),
        );

        let mut output = Vec::new();
        let result = pipeline.convert(b"fake heic data", TargetFormat::Png, &mut output);

        assert!(result.is_ok());
        assert_eq!(*written.lock().unwrap(), vec![(100, 100, TargetFormat::Png)]);
    }

    #[test]
    fn test_reader_failure() {
        let writer = MockWriter::new(false);
        let written = writer.written.clone();
        let pipeline = HeicConversionPipeline::with_custom(
            MockReader { mock_data: None },
            writer,
            ConversionConfig::default(),
        );

        let mut output = Vec::new();
        let result = pipeline.convert(CORRUPT, TargetFormat::Jpg, &mut output);

        assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
        assert!(written.lock().unwrap().is_empty());
        assert!(output.is_empty());
    }

    #[test]
    fn test_writer_failure() {
        let pipeline = HeicConversionPipeline::with_custom(
            MockReader { mock_data: None },
            MockWriter::new(true),
            ConversionConfig::default(),
        );

        let mut output = Vec::new();
        let result = pipeline.convert(b"fake heic data", TargetFormat::Jpg, &mut output);

        assert!(matches!(result.unwrap_err(), ConversionError::EncodeError(_)));
    }

    #[test]
    fn test_dimension_validation_failure() {
        let config = ConversionConfig::builder()
            .max_dimension(Some(50))
            .build();
        let pipeline = HeicConversionPipeline::with_custom(MockReader::square(100), MockWriter::new(false), config);

        let result = pipeline.convert(b"fake heic data", TargetFormat::Jpg, &mut Vec::new());
        assert!(matches!(result.unwrap_err(), ConversionError::InvalidDimensions(100, 100)));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let reader = MockReader {
            mock_data: Some(DecodedImage { mode: PixelMode::Rgb, width: 0, height: 10, data: Vec::new() }),
        };
        let pipeline = HeicConversionPipeline::with_custom(reader, MockWriter::new(false), ConversionConfig::default());

        let result = pipeline.convert(b"fake heic data", TargetFormat::Jpg, &mut Vec::new());
        assert!(matches!(result.unwrap_err(), ConversionError::InvalidDimensions(0, 10)));
    }

    #[test]
    fn test_buffer_mismatch_rejected_even_without_validation() {
        let reader = MockReader {
            mock_data: Some(DecodedImage { mode: PixelMode::Rgba, width: 10, height: 10, data: vec![0; 300] }),
        };
        let config = ConversionConfig::builder().validate_dimensions(false).build();
        let pipeline = HeicConversionPipeline::with_custom(reader, MockWriter::new(false), config);

        let result = pipeline.convert(b"fake heic data", TargetFormat::Png, &mut Vec::new());
        assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
    }

    #[test]
    fn test_convert_file_writes_beside_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.HEIC");
        std::fs::write(&input, b"fake heic data").unwrap();

        let output = real_pipeline(ConversionConfig::default())
            .convert_file(&input, TargetFormat::Jpg)
            .unwrap();

        assert_eq!(output, dir.path().join("a.jpg"));
        let decoded = image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 100));
        // input + output, no leftover temp file
        assert_eq!(dir_entries(dir.path()), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_output_mode_matches_a_plain_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.HEIC");
        std::fs::write(&input, b"fake heic data").unwrap();
        let plain = dir.path().join("plain.bin");
        std::fs::write(&plain, b"x").unwrap();

        for atomic in [true, false] {
            let config = ConversionConfig::builder().atomic_write(atomic).build();
            let output = real_pipeline(config).convert_file(&input, TargetFormat::Png).unwrap();

            let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode(&output), mode(&plain), "atomic = {atomic}");
        }
    }

    #[test]
    fn test_convert_file_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("IMG_0001.heic");
        std::fs::write(&input, b"fake heic data").unwrap();
        let pipeline = real_pipeline(ConversionConfig::default());

        for format in TargetFormat::ALL {
            let output = pipeline.convert_file(&input, format).unwrap();
            assert_eq!(output.extension().unwrap(), format.extension());
            let decoded = image::open(&output).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (100, 100), "{format}");
        }
    }

    #[test]
    fn test_convert_file_in_place_mode() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("b.heic");
        std::fs::write(&input, b"fake heic data").unwrap();

        let config = ConversionConfig::builder().atomic_write(false).build();
        let output = real_pipeline(config).convert_file(&input, TargetFormat::Png).unwrap();

        assert_eq!(image::open(&output).unwrap().width(), 100);
    }

    #[test]
    fn test_convert_file_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("c.heic");
        let existing = dir.path().join("c.png");
        std::fs::write(&input, b"fake heic data").unwrap();
        std::fs::write(&existing, b"stale").unwrap();

        let output = real_pipeline(ConversionConfig::default())
            .convert_file(&input, TargetFormat::Png)
            .unwrap();

        assert_eq!(output, existing);
        assert!(image::open(&output).is_ok());
    }

    #[test]
    fn test_missing_input_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.heic");

        let result = real_pipeline(ConversionConfig::default()).convert_file(&input, TargetFormat::Jpg);

        assert!(matches!(result.unwrap_err(), ConversionError::InputReadError(_)));
        assert_eq!(dir_entries(dir.path()), 0);
    }

    #[test]
    fn test_decode_failure_leaves_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("corrupt.HEIC");
        let existing = dir.path().join("corrupt.jpg");
        std::fs::write(&input, CORRUPT).unwrap();
        std::fs::write(&existing, b"keep me").unwrap();

        for atomic in [true, false] {
            let config = ConversionConfig::builder().atomic_write(atomic).build();
            let result = real_pipeline(config).convert_file(&input, TargetFormat::Jpg);
            assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
            assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");
        }
    }

    #[test]
    fn test_atomic_encode_failure_keeps_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("d.heic");
        let existing = dir.path().join("d.gif");
        std::fs::write(&input, b"fake heic data").unwrap();
        std::fs::write(&existing, b"previous").unwrap();

        let pipeline = HeicConversionPipeline::with_custom(
            MockReader::square(4),
            MockWriter::new(true),
            ConversionConfig::default(),
        );
        let result = pipeline.convert_file(&input, TargetFormat::Gif);

        assert!(matches!(result.unwrap_err(), ConversionError::EncodeError(_)));
        assert_eq!(std::fs::read(&existing).unwrap(), b"previous");
        assert_eq!(dir_entries(dir.path()), 2);
    }

    #[test]
    fn test_in_place_encode_failure_may_leave_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("e.heic");
        std::fs::write(&input, b"fake heic data").unwrap();

        let config = ConversionConfig::builder().atomic_write(false).build();
        let pipeline = HeicConversionPipeline::with_custom(MockReader::square(4), MockWriter::new(true), config);
        let result = pipeline.convert_file(&input, TargetFormat::Tiff);

        assert!(result.is_err());
        assert_eq!(std::fs::read(dir.path().join("e.tiff")).unwrap(), b"partial");
    }

    #[test]
    fn test_convert_request_uses_request_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("f.HEIC");
        std::fs::write(&input, b"fake heic data").unwrap();

        let request = ConversionRequest::new(&input, TargetFormat::Tiff);
        let output = real_pipeline(ConversionConfig::default())
            .convert_request(&request)
            .unwrap();

        assert_eq!(output, dir.path().join("f.tiff"));
    }

    #[test]
    fn test_config_accessors() {
        let mut pipeline = real_pipeline(ConversionConfig::default());
        assert_eq!(pipeline.config().jpeg_quality, 75);
        pipeline.set_config(ConversionConfig::builder().jpeg_quality(90).build());
        assert_eq!(pipeline.config().jpeg_quality, 90);
    }
}
