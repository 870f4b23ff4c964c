//! JPEG frame-header locator.
//!
//! Dimensions live in the first Start Of Frame segment, which can sit after
//! any number of APPn, DQT, DHT or COM segments. The scanner walks the marker
//! stream as an explicit state machine; running out of bytes is one of its
//! ordinary outcomes and surfaces as `CorruptOrTruncated`.

use std::io;
use std::ops::RangeInclusive;

use byteorder::{BigEndian, ReadBytesExt};
use tracing::trace;

use crate::error::{Result, SniffError};
use crate::signatures::{JPEG_SOI, is_jpeg};
use crate::source::{ByteSource, PositionGuard};
use crate::types::{ImageFormat, Size};

pub const MARKER_PREFIX: u8 = 0xFF;

/// SOF0 baseline, SOF1 extended sequential, SOF2 progressive, SOF3 lossless.
pub const SOF_MARKERS: RangeInclusive<u8> = 0xC0..=0xC3;

/// RST0..RST7 and TEM carry no length field.
const STANDALONE_MARKERS: RangeInclusive<u8> = 0xD0..=0xD7;
const TEM: u8 = 0x01;
const EOI: u8 = 0xD9;

/// Segment length (2 bytes) and sample precision (1 byte) precede the height.
const FRAME_HEADER_SKIP: u64 = 3;

/// The length field counts its own two bytes.
const SEGMENT_LENGTH_LEN: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Scanning for a 0xFF byte.
    ExpectMarker,
    /// Consuming 0xFF fill bytes until the marker code.
    ExpectMarkerCode,
    /// Positioned just after an SOF marker code.
    AtFrameHeader,
    /// Positioned at the length field of a segment to skip.
    SkipSegment(u8),
}

/// Finds the first SOF segment and reads its big-endian height and width.
///
/// The source is returned to its starting position on every exit path when
/// it is seekable.
pub fn decode_jpeg<S: ByteSource + ?Sized>(source: &mut S) -> Result<Size> {
    let mut source = PositionGuard::acquire(source)?;

    if !is_jpeg(&mut *source) {
        return Err(SniffError::NotThisFormat {
            expected: ImageFormat::Jpeg,
        });
    }

    source
        .seek_from_start(JPEG_SOI.len() as u64)
        .map_err(|err| SniffError::from_read(ImageFormat::Jpeg, err))?;

    scan_for_frame(&mut *source)
}

fn scan_for_frame<S: ByteSource + ?Sized>(source: &mut S) -> Result<Size> {
    let mut state = ScanState::ExpectMarker;

    loop {
        state = match state {
            ScanState::ExpectMarker => match next_byte(source)? {
                MARKER_PREFIX => ScanState::ExpectMarkerCode,
                _ => ScanState::ExpectMarker,
            },

            ScanState::ExpectMarkerCode => match next_byte(source)? {
                MARKER_PREFIX => ScanState::ExpectMarkerCode,
                code if SOF_MARKERS.contains(&code) => {
                    trace!(marker = format_args!("{code:#04X}"), "found frame header");
                    ScanState::AtFrameHeader
                }
                code if code == TEM || STANDALONE_MARKERS.contains(&code) => {
                    ScanState::ExpectMarker
                }
                EOI => {
                    return Err(SniffError::truncated(
                        ImageFormat::Jpeg,
                        "end of image marker before any frame header",
                    ));
                }
                code => ScanState::SkipSegment(code),
            },

            ScanState::AtFrameHeader => {
                return read_frame_size(source)
                    .map_err(|err| SniffError::from_read(ImageFormat::Jpeg, err));
            }

            ScanState::SkipSegment(code) => {
                let length = source
                    .read_u16::<BigEndian>()
                    .map_err(|err| SniffError::from_read(ImageFormat::Jpeg, err))?;
                let Some(payload) = length.checked_sub(SEGMENT_LENGTH_LEN) else {
                    return Err(SniffError::truncated(
                        ImageFormat::Jpeg,
                        format!("segment {code:#04X} declares invalid length {length}"),
                    ));
                };
                trace!(marker = format_args!("{code:#04X}"), length, "skipping segment");
                source
                    .skip(payload.into())
                    .map_err(|err| SniffError::from_read(ImageFormat::Jpeg, err))?;
                ScanState::ExpectMarker
            }
        };
    }
}

fn next_byte<S: ByteSource + ?Sized>(source: &mut S) -> Result<u8> {
    source.read_u8().map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => SniffError::truncated(
            ImageFormat::Jpeg,
            "hit the end of the stream without finding the dimensions",
        ),
        _ => SniffError::Io(err),
    })
}

fn read_frame_size<S: ByteSource + ?Sized>(source: &mut S) -> io::Result<Size> {
    source.skip(FRAME_HEADER_SKIP)?;
    let height = source.read_u16::<BigEndian>()?;
    let width = source.read_u16::<BigEndian>()?;
    Ok(Size::new(width.into(), height.into()))
}
