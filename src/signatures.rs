//! Magic-byte matchers.
//!
//! Each matcher inspects a fixed prefix at the current position and leaves
//! the position where it found it (seekable sources only). A source too short
//! to hold the prefix, or one that fails to read, simply does not match.


use tracing::trace;

use crate::source::{ByteSource, PositionGuard};
use crate::types::ImageFormat;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub const BMP_SIGNATURE: [u8; 2] = *b"BM";
pub const GIF_SIGNATURE: [u8; 3] = *b"GIF";
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// "GIF" followed by a three character version such as `87a`.
pub const GIF_HEADER_LEN: usize = 6;

fn peek_prefix<const N: usize, S: ByteSource + ?Sized>(source: &mut S) -> Option<[u8; N]> {
    let mut guard = match PositionGuard::acquire(source) {
        Ok(guard) => guard,
        Err(err) => {
            trace!(%err, "source position unavailable");
            return None;
        }
    };
    let mut prefix = [0u8; N];
    match guard.read_exact(&mut prefix) {
        Ok(()) => Some(prefix),
        Err(err) => {
            trace!(%err, len = N, "signature prefix unavailable");
            None
        }
    }
}

pub fn is_png<S: ByteSource + ?Sized>(source: &mut S) -> bool {
    peek_prefix::<8, S>(source).is_some_and(|prefix| prefix == PNG_SIGNATURE)
}

pub fn is_bmp<S: ByteSource + ?Sized>(source: &mut S) -> bool {
    peek_prefix::<2, S>(source).is_some_and(|prefix| prefix == BMP_SIGNATURE)
}

pub fn is_gif<S: ByteSource + ?Sized>(source: &mut S) -> bool {
    peek_prefix::<GIF_HEADER_LEN, S>(source).is_some_and(|header| {
        header[..3] == GIF_SIGNATURE && is_gif_version(&header[3..])
    })
}

pub fn is_jpeg<S: ByteSource + ?Sized>(source: &mut S) -> bool {
    peek_prefix::<2, S>(source).is_some_and(|prefix| prefix == JPEG_SOI)
}

/// Two ASCII digits then an ASCII letter, e.g. `87a` or `89a`.
#[inline]
pub fn is_gif_version(version: &[u8]) -> bool {
    matches!(
        version,
        [major, minor, revision]
            if major.is_ascii_digit() && minor.is_ascii_digit() && revision.is_ascii_alphabetic()
    )
}

/// Runs the matcher for `format`. `Unknown` has no signature and never matches.
pub fn is_image_type<S: ByteSource + ?Sized>(source: &mut S, format: ImageFormat) -> bool {
    match format {
        ImageFormat::Png => is_png(source),
        ImageFormat::Bmp => is_bmp(source),
        ImageFormat::Gif => is_gif(source),
        ImageFormat::Jpeg => is_jpeg(source),
        ImageFormat::Unknown => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Unseekable;
    use std::io::Cursor;

    #[test]
    fn test_matchers_restore_position() {
        let mut cursor = Cursor::new(PNG_SIGNATURE.to_vec());
        assert!(is_png(&mut cursor));
        assert!(!is_gif(&mut cursor));
        assert!(!is_bmp(&mut cursor));
        assert!(!is_jpeg(&mut cursor));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_short_source_is_not_a_match() {
        let mut cursor = Cursor::new(vec![0x89, 0x50, 0x4E]);
        assert!(!is_png(&mut cursor));
        assert_eq!(cursor.position(), 0);
        assert!(!is_jpeg(&mut Cursor::new(Vec::<u8>::new())));
    }

    #[test]
    fn test_matchers_check_current_position() {
        let mut data = vec![0u8; 4];
        data.extend_from_slice(&JPEG_SOI);
        let mut cursor = Cursor::new(data);
        assert!(!is_jpeg(&mut cursor));
        cursor.set_position(4);
        assert!(is_jpeg(&mut cursor));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_gif_version() {
        assert!(is_gif_version(b"87a"));
        assert!(is_gif_version(b"89a"));
        assert!(!is_gif_version(b"89z9"));
        assert!(!is_gif_version(b"8a9"));
        assert!(!is_gif_version(b"a89"));
        assert!(!is_gif_version(b"89"));
    }

    #[test]
    fn test_gif_rejects_bad_version() {
        assert!(is_gif(&mut Cursor::new(b"GIF89a".to_vec())));
        assert!(!is_gif(&mut Cursor::new(b"GIF8a9".to_vec())));
        assert!(!is_gif(&mut Cursor::new(b"GIF".to_vec())));
    }

    #[test]
    fn test_unseekable_matcher_consumes() {
        let mut source = Unseekable::new(&b"BM\x00\x00"[..]);
        assert!(is_bmp(&mut source));
        assert_eq!(source.consumed(), 2);
    }

    #[test]
    fn test_is_image_type_unknown() {
        let mut cursor = Cursor::new(PNG_SIGNATURE.to_vec());
        assert!(is_image_type(&mut cursor, ImageFormat::Png));
        assert!(!is_image_type(&mut cursor, ImageFormat::Unknown));
    }
}
