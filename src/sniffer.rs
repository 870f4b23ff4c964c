//! Public entry point: resolve the format, then read its header.

use std::sync::LazyLock;

use tracing::{debug, warn};

use crate::detect::{probe, resolve_with};
use crate::error::{Result, SniffError};
use crate::fallback::{FallbackDecoder, ImagesizeFallback};
use crate::formats::decode_header;
use crate::source::{ByteSource, Replay};
use crate::types::{ImageFormat, ImageInfo, Size};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SniffOptions {
    /// Fail on an unusable MIME hint, or on a hint the stream contradicts,
    /// instead of falling back to probing.
    pub strict_hint: bool,
}

pub struct Sniffer {
    options: SniffOptions,
    fallback: Box<dyn FallbackDecoder>,
}

static DEFAULT_SNIFFER: LazyLock<Sniffer> = LazyLock::new(Sniffer::new);

impl Default for Sniffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sniffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sniffer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Sniffer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SniffOptions::default())
    }

    #[must_use]
    pub fn with_options(options: SniffOptions) -> Self {
        Self {
            options,
            fallback: Box::new(ImagesizeFallback::default()),
        }
    }

    /// Shared instance with default options and the `imagesize` fallback.
    pub fn shared() -> &'static Sniffer {
        &DEFAULT_SNIFFER
    }

    #[must_use]
    pub fn strict_hint(mut self, strict: bool) -> Self {
        self.options.strict_hint = strict;
        self
    }

    #[must_use]
    pub fn fallback(mut self, fallback: impl FallbackDecoder + 'static) -> Self {
        self.fallback = Box::new(fallback);
        self
    }

    #[inline]
    pub fn options(&self) -> SniffOptions {
        self.options
    }

    pub fn image_size<S: ByteSource>(&self, source: &mut S, mime_hint: Option<&str>) -> Result<Size> {
        self.inspect(source, mime_hint).map(|info| info.size)
    }

    /// Detects the format and reads the dimensions.
    ///
    /// Seekable sources are left where they were. Forward-only sources are
    /// buffered internally, up to [`REPLAY_PREFIX`](crate::source::REPLAY_PREFIX) bytes, while probing and end up
    /// consumed.
    pub fn inspect<S: ByteSource>(&self, source: &mut S, mime_hint: Option<&str>) -> Result<ImageInfo> {
        if source.is_seekable() {
            self.dispatch(source, mime_hint)
        } else {
            self.dispatch(&mut Replay::new(source), mime_hint)
        }
    }

    fn dispatch<S: ByteSource>(&self, source: &mut S, mime_hint: Option<&str>) -> Result<ImageInfo> {
        let strict = self.options.strict_hint;
        let resolution = resolve_with(source, mime_hint, strict)?;

        if !resolution.from_hint {
            return self.decode_probed(resolution.format, source);
        }

        match decode_header(resolution.format, source) {
            Ok(size) => Ok(ImageInfo {
                format: resolution.format,
                size,
            }),
            Err(SniffError::NotThisFormat { expected }) if !strict => {
                warn!(hinted = %expected, "stream does not match its MIME hint, probing instead");
                let format = probe(source);
                self.decode_probed(format, source)
            }
            Err(err) => Err(err),
        }
    }

    fn decode_probed<S: ByteSource>(&self, format: ImageFormat, source: &mut S) -> Result<ImageInfo> {
        if format.is_known() {
            let size = decode_header(format, source)?;
            return Ok(ImageInfo { format, size });
        }

        debug!("no signature matched, handing off to the fallback decoder");
        let size = self
            .fallback
            .decode_size(source)
            .map_err(|err| match err {
                SniffError::UndetectableFormat(_) => err,
                other => SniffError::UndetectableFormat(other.to_string()),
            })?;
        Ok(ImageInfo {
            format: ImageFormat::Unknown,
            size,
        })
    }
}

/// Reads the dimensions of the image at the current position of `source`.
///
/// `mime_hint` is best-effort; the matching decoder re-checks the signature
/// and probing takes over if the hint was wrong.
pub fn get_image_size<S: ByteSource>(source: &mut S, mime_hint: Option<&str>) -> Result<Size> {
    Sniffer::shared().image_size(source, mime_hint)
}
