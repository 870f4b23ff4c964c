use tracing::debug;

use crate::error::Result;
use crate::mime::parse_mime_hint;
use crate::signatures::is_image_type;
use crate::source::ByteSource;
use crate::types::ImageFormat;

/// Where a resolved format came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub format: ImageFormat,
    /// True when the format was taken from the MIME hint without probing.
    pub from_hint: bool,
}

/// Tries every signature in [`ImageFormat::PROBE_ORDER`] and returns the
/// first match, or `Unknown`.
pub fn probe<S: ByteSource + ?Sized>(source: &mut S) -> ImageFormat {
    ImageFormat::PROBE_ORDER
        .into_iter()
        .find(|&format| is_image_type(&mut *source, format))
        .unwrap_or(ImageFormat::Unknown)
}

/// Resolves the format, trusting a usable hint. An invalid hint is treated
/// as absent.
pub fn resolve<S: ByteSource + ?Sized>(source: &mut S, mime_hint: Option<&str>) -> ImageFormat {
    if let Some(hint) = mime_hint {
        match parse_mime_hint(hint) {
            Ok(format) => return format,
            Err(err) => debug!(%err, "ignoring MIME hint"),
        }
    }
    probe(source)
}

/// Like [`resolve`], but reports how the format was found. With `strict`
/// set, an unusable hint is an error instead of being ignored.
pub fn resolve_with<S: ByteSource + ?Sized>(
    source: &mut S,
    mime_hint: Option<&str>,
    strict: bool,
) -> Result<Resolution> {
    if let Some(hint) = mime_hint {
        match parse_mime_hint(hint) {
            Ok(format) => {
                debug!(hint, %format, "using MIME hint");
                return Ok(Resolution {
                    format,
                    from_hint: true,
                });
            }
            Err(err) if strict => return Err(err),
            Err(err) => debug!(%err, "ignoring MIME hint"),
        }
    }

    let format = probe(source);
    debug!(%format, "probed signature");
    Ok(Resolution {
        format,
        from_hint: false,
    })
}

/// Probe-only detection reported as a MIME string,
/// `application/octet-stream` when nothing matched.
pub fn sniff_mime<S: ByteSource + ?Sized>(source: &mut S) -> &'static str {
    probe(source).mime_type()
}
