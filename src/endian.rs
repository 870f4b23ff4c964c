//! Byte-order swaps for 16, 32 and 64 bit words.
//!
//! PNG and JPEG store their dimensions big-endian, BMP and GIF little-endian.
//! The decoders read those fields through `byteorder::ReadBytesExt`; the swaps
//! here are for callers holding a word already read in the wrong order.

#[inline]
#[must_use]
pub const fn swap16(word: u16) -> u16 {
    ((word >> 8) & 0x00FF) | ((word << 8) & 0xFF00)
}

#[inline]
#[must_use]
pub const fn swap32(word: u32) -> u32 {
    ((word >> 24) & 0x0000_00FF)
        | ((word >> 8) & 0x0000_FF00)
        | ((word << 8) & 0x00FF_0000)
        | ((word << 24) & 0xFF00_0000)
}

#[inline]
#[must_use]
pub const fn swap64(word: u64) -> u64 {
    ((word >> 56) & 0x0000_0000_0000_00FF)
        | ((word >> 40) & 0x0000_0000_0000_FF00)
        | ((word >> 24) & 0x0000_0000_00FF_0000)
        | ((word >> 8) & 0x0000_0000_FF00_0000)
        | ((word << 8) & 0x0000_00FF_0000_0000)
        | ((word << 24) & 0x0000_FF00_0000_0000)
        | ((word << 40) & 0x00FF_0000_0000_0000)
        | ((word << 56) & 0xFF00_0000_0000_0000)
}
