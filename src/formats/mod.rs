pub mod bmp;
pub mod gif;
pub mod jpeg;
pub mod png;

pub use bmp::decode_bmp;
pub use gif::decode_gif;
pub use jpeg::decode_jpeg;
pub use png::decode_png;

use crate::error::{Result, SniffError};
use crate::source::ByteSource;
use crate::types::{ImageFormat, Size};

/// Routes to the header decoder for `format`. Each decoder re-validates the
/// signature, so a wrong `format` yields `NotThisFormat` rather than garbage.
pub fn decode_header<S: ByteSource + ?Sized>(format: ImageFormat, source: &mut S) -> Result<Size> {
    match format {
        ImageFormat::Png => decode_png(source),
        ImageFormat::Bmp => decode_bmp(source),
        ImageFormat::Gif => decode_gif(source),
        ImageFormat::Jpeg => decode_jpeg(source),
        ImageFormat::Unknown => Err(SniffError::UndetectableFormat(
            "no header decoder for an unrecognised signature".into(),
        )),
    }
}
