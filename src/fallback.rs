//! Generic decoder used when no signature matches.

use std::io::Read;

use crate::error::{Result, SniffError};
use crate::source::{ByteSource, PositionGuard};
use crate::types::Size;

/// Bytes handed to the generic decoder. Enough for the headers of every
/// format `imagesize` understands.
pub const FALLBACK_WINDOW: u64 = 256 * 1024;

/// Reports dimensions for streams none of the built-in decoders recognise.
pub trait FallbackDecoder: Send + Sync {
    fn decode_size(&self, source: &mut dyn ByteSource) -> Result<Size>;
}

/// Default fallback backed by the `imagesize` crate.
#[derive(Debug, Clone, Copy)]
pub struct ImagesizeFallback {
    window: u64,
}

impl ImagesizeFallback {
    #[must_use]
    pub fn with_window(window: u64) -> Self {
        Self { window }
    }
}

impl Default for ImagesizeFallback {
    fn default() -> Self {
        Self::with_window(FALLBACK_WINDOW)
    }
}

impl FallbackDecoder for ImagesizeFallback {
    fn decode_size(&self, source: &mut dyn ByteSource) -> Result<Size> {
        let mut source = PositionGuard::acquire(source)?;

        let mut header = Vec::new();
        Read::take(&mut *source, self.window).read_to_end(&mut header)?;

        let size = imagesize::blob_size(&header)
            .map_err(|err| SniffError::UndetectableFormat(err.to_string()))?;

        let dimension = |value: usize| {
            i64::try_from(value).map_err(|_| {
                SniffError::UndetectableFormat(format!("dimension {value} out of range"))
            })
        };
        Ok(Size::new(dimension(size.width)?, dimension(size.height)?))
    }
}

/// Fallback that refuses everything. Useful when only the four built-in
/// formats should be accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl FallbackDecoder for NoFallback {
    fn decode_size(&self, _source: &mut dyn ByteSource) -> Result<Size> {
        Err(SniffError::UndetectableFormat(
            "no signature matched and the fallback decoder is disabled".into(),
        ))
    }
}
