use std::io;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Result, SniffError};
use crate::signatures::is_bmp;
use crate::source::{ByteSource, PositionGuard};
use crate::types::{ImageFormat, Size};

// jump over:
// 2: the magic number
// 4: size of the file
// 2: reserved
// 2: reserved
// 4: start of pixel data offset
// 4: info header size
pub const INFO_DIMENSIONS_OFFSET: u64 = 18;

/// Reads the signed little-endian width and height from the info header.
///
/// Values are returned exactly as stored. A negative height is legal and
/// means the rows run top to bottom; see [`Size::is_top_down`].
pub fn decode_bmp<S: ByteSource + ?Sized>(source: &mut S) -> Result<Size> {
    let mut source = PositionGuard::acquire(source)?;

    if !is_bmp(&mut *source) {
        return Err(SniffError::NotThisFormat {
            expected: ImageFormat::Bmp,
        });
    }

    read_info_dimensions(&mut source).map_err(|err| SniffError::from_read(ImageFormat::Bmp, err))
}

fn read_info_dimensions<S: ByteSource + ?Sized>(
    source: &mut PositionGuard<'_, S>,
) -> io::Result<Size> {
    source.seek_from_start(INFO_DIMENSIONS_OFFSET)?;
    let width = source.read_i32::<LittleEndian>()?;
    let height = source.read_i32::<LittleEndian>()?;
    Ok(Size::new(width.into(), height.into()))
}
