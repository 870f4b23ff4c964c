use std::io;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{Result, SniffError};
use crate::signatures::is_png;
use crate::source::{ByteSource, PositionGuard};
use crate::types::{ImageFormat, Size};

/// 8 byte signature, 4 byte IHDR length, 4 byte `IHDR` tag.
pub const IHDR_DIMENSIONS_OFFSET: u64 = 16;

/// Reads width and height from the IHDR chunk. Both are big-endian `u32`.
pub fn decode_png<S: ByteSource + ?Sized>(source: &mut S) -> Result<Size> {
    let mut source = PositionGuard::acquire(source)?;

    if !is_png(&mut *source) {
        return Err(SniffError::NotThisFormat {
            expected: ImageFormat::Png,
        });
    }

    read_ihdr_dimensions(&mut source).map_err(|err| SniffError::from_read(ImageFormat::Png, err))
}

fn read_ihdr_dimensions<S: ByteSource + ?Sized>(
    source: &mut PositionGuard<'_, S>,
) -> io::Result<Size> {
    source.seek_from_start(IHDR_DIMENSIONS_OFFSET)?;
    let width = source.read_u32::<BigEndian>()?;
    let height = source.read_u32::<BigEndian>()?;
    Ok(Size::new(width.into(), height.into()))
}
