use std::io;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Result, SniffError};
use crate::signatures::{GIF_HEADER_LEN, is_gif};
use crate::source::{ByteSource, PositionGuard};
use crate::types::{ImageFormat, Size};

/// Reads the logical screen width and height (little-endian `u16`) that
/// follow the `GIF87a`/`GIF89a` header.
pub fn decode_gif<S: ByteSource + ?Sized>(source: &mut S) -> Result<Size> {
    let mut source = PositionGuard::acquire(source)?;

    if !is_gif(&mut *source) {
        return Err(SniffError::NotThisFormat {
            expected: ImageFormat::Gif,
        });
    }

    read_screen_dimensions(&mut source).map_err(|err| SniffError::from_read(ImageFormat::Gif, err))
}

fn read_screen_dimensions<S: ByteSource + ?Sized>(
    source: &mut PositionGuard<'_, S>,
) -> io::Result<Size> {
    source.seek_from_start(GIF_HEADER_LEN as u64)?;
    let width = source.read_u16::<LittleEndian>()?;
    let height = source.read_u16::<LittleEndian>()?;
    Ok(Size::new(width.into(), height.into()))
}
