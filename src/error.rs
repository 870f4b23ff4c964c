use std::io;
use thiserror::Error;

use crate::types::ImageFormat;

#[derive(Debug, Error)]
pub enum SniffError {
    #[error("This is not a {expected} stream")]
    NotThisFormat { expected: ImageFormat },

    #[error("Corrupt or truncated {format} data: {reason}")]
    CorruptOrTruncated {
        format: ImageFormat,
        reason: String,
    },

    #[error("Invalid or undetectable image format: {0}")]
    UndetectableFormat(String),

    #[error("Invalid MIME hint: {0}")]
    InvalidMimeHint(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SniffError>;

impl SniffError {
    pub(crate) fn truncated(format: ImageFormat, reason: impl Into<String>) -> Self {
        Self::CorruptOrTruncated {
            format,
            reason: reason.into(),
        }
    }

    /// Maps a read failure inside a confirmed `format` decoder. Running out of
    /// bytes is corruption, anything else stays an I/O error.
    pub(crate) fn from_read(format: ImageFormat, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::truncated(format, "unexpected end of data")
        } else {
            Self::Io(err)
        }
    }

    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::CorruptOrTruncated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_maps_to_truncation() {
        let err = io::Error::from(io::ErrorKind::UnexpectedEof);
        let mapped = SniffError::from_read(ImageFormat::Gif, err);
        assert!(mapped.is_truncation());
        assert_eq!(
            mapped.to_string(),
            "Corrupt or truncated GIF data: unexpected end of data"
        );
    }

    #[test]
    fn test_other_io_errors_pass_through() {
        let err = io::Error::from(io::ErrorKind::PermissionDenied);
        let mapped = SniffError::from_read(ImageFormat::Png, err);
        assert!(matches!(mapped, SniffError::Io(_)));
    }

    #[test]
    fn test_not_this_format_message() {
        let err = SniffError::NotThisFormat {
            expected: ImageFormat::Bmp,
        };
        assert_eq!(err.to_string(), "This is not a BMP stream");
    }
}
