use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode HEIC image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Unsupported target format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Which side of a conversion went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The source could not be read or parsed as a HEIF image.
    Decode,
    /// The target format is unsupported or the destination could not be written.
    Encode,
}

impl ConversionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ConversionError::InputReadError(_)
            | ConversionError::DecodeError(_)
            | ConversionError::InvalidDimensions(_, _) => FailureKind::Decode,
            ConversionError::OutputWriteError(_)
            | ConversionError::EncodeError(_)
            | ConversionError::UnsupportedFormat(_)
            | ConversionError::IoError(_) => FailureKind::Encode,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
