//! Byte sources with an observable read position.
//!
//! Detection only ever needs a handful of header bytes, but it must be able to
//! look at them without disturbing the caller's stream. [`PositionGuard`] is the
//! peek scope: it remembers where the stream was and puts it back on drop, for
//! every exit path, whenever the source can seek.

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::ops::{Deref, DerefMut};

use tracing::warn;

/// A sequence of bytes with a current read position.
///
/// Positions are absolute offsets from the start of the source. Sources that
/// report `is_seekable() == false` may still move forward with
/// [`seek_to`](ByteSource::seek_to) but cannot go back, so anything read from
/// them is consumed.
pub trait ByteSource: Read {
    fn is_seekable(&self) -> bool;

    fn position(&mut self) -> io::Result<u64>;

    fn seek_to(&mut self, offset: u64) -> io::Result<()>;

    /// Advances the position by `count` bytes.
    fn skip(&mut self, count: u64) -> io::Result<()> {
        let here = self.position()?;
        let target = here.checked_add(count).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "skip past the end of u64")
        })?;
        self.seek_to(target)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn is_seekable(&self) -> bool {
        (**self).is_seekable()
    }

    fn position(&mut self) -> io::Result<u64> {
        (**self).position()
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        (**self).seek_to(offset)
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn is_seekable(&self) -> bool {
        true
    }

    fn position(&mut self) -> io::Result<u64> {
        Ok(Cursor::position(self))
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.set_position(offset);
        Ok(())
    }
}

impl ByteSource for File {
    fn is_seekable(&self) -> bool {
        true
    }

    fn position(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset)).map(drop)
    }
}

impl<R: Read + Seek> ByteSource for BufReader<R> {
    fn is_seekable(&self) -> bool {
        true
    }

    fn position(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        let here = self.stream_position()?;
        match i64::try_from(i128::from(offset) - i128::from(here)) {
            // Stays inside the buffer when the jump is short.
            Ok(delta) => self.seek_relative(delta),
            Err(_) => self.seek(SeekFrom::Start(offset)).map(drop),
        }
    }
}

/// Adapter for any other `Read + Seek` type.
#[derive(Debug)]
pub struct Seekable<R> {
    inner: R,
}

impl<R: Read + Seek> Seekable<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Seekable<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Seek> ByteSource for Seekable<R> {
    fn is_seekable(&self) -> bool {
        true
    }

    fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(offset)).map(drop)
    }
}

/// Forward-only source over a plain reader, e.g. a pipe or socket.
///
/// Forward seeks read and discard; backward seeks fail with
/// [`io::ErrorKind::Unsupported`].
#[derive(Debug)]
pub struct Unseekable<R> {
    inner: R,
    consumed: u64,
}

impl<R: Read> Unseekable<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Unseekable<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.consumed += n as u64;
        Ok(n)
    }
}

impl<R: Read> ByteSource for Unseekable<R> {
    fn is_seekable(&self) -> bool {
        false
    }

    fn position(&mut self) -> io::Result<u64> {
        Ok(self.consumed)
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        if offset < self.consumed {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!(
                    "cannot seek back to {offset} on a forward-only source at {}",
                    self.consumed
                ),
            ));
        }
        discard(self, offset - self.consumed)
    }
}

/// Longest prefix a [`Replay`] keeps by default. Covers every fixed-offset
/// header and the generic decoder's window.
pub const REPLAY_PREFIX: usize = 256 * 1024;

/// Turns a forward-only reader into a seekable source by keeping the first
/// `limit` bytes read. Backward seeks replay from memory.
///
/// Once a read or skip goes past the recorded prefix the extra bytes flow
/// through unstored, and from then on the source reports itself as not
/// seekable: it can only move forward.
#[derive(Debug)]
pub struct Replay<R> {
    inner: R,
    history: Vec<u8>,
    limit: usize,
    cursor: u64,
    spilled: bool,
}

impl<R: Read> Replay<R> {
    pub fn new(inner: R) -> Self {
        Self::with_limit(inner, REPLAY_PREFIX)
    }

    pub fn with_limit(inner: R, limit: usize) -> Self {
        Self {
            inner,
            history: Vec::new(),
            limit,
            cursor: 0,
            spilled: false,
        }
    }

    /// The recorded prefix of the underlying reader.
    pub fn recorded(&self) -> &[u8] {
        &self.history
    }

    fn recorded_len(&self) -> u64 {
        self.history.len() as u64
    }
}

impl<R: Read> Read for Replay<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.spilled && self.cursor < self.recorded_len() {
            let pending = &self.history[self.cursor as usize..];
            let n = pending.len().min(buf.len());
            buf[..n].copy_from_slice(&pending[..n]);
            self.cursor += n as u64;
            return Ok(n);
        }

        let n = self.inner.read(buf)?;
        if !self.spilled {
            let room = self.limit - self.history.len();
            let kept = n.min(room);
            self.history.extend_from_slice(&buf[..kept]);
            self.spilled = n > kept;
        }
        self.cursor += n as u64;
        Ok(n)
    }
}

impl<R: Read> ByteSource for Replay<R> {
    fn is_seekable(&self) -> bool {
        !self.spilled
    }

    fn position(&mut self) -> io::Result<u64> {
        Ok(self.cursor)
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        let recorded = self.recorded_len();
        if !self.spilled && offset <= recorded {
            self.cursor = offset;
            return Ok(());
        }
        if offset < self.cursor {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!(
                    "cannot seek back to {offset}: only the first {recorded} bytes were kept"
                ),
            ));
        }
        self.cursor = self.cursor.max(recorded);
        discard(self, offset - self.cursor)
    }
}

fn discard<R: Read + ?Sized>(reader: &mut R, count: u64) -> io::Result<()> {
    let copied = io::copy(&mut Read::take(reader, count), &mut io::sink())?;
    if copied < count {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("source ended {} bytes short of the seek target", count - copied),
        ));
    }
    Ok(())
}

/// Peek scope over a [`ByteSource`].
///
/// Derefs to the source, so reads go through the guard. On drop the position
/// recorded at [`acquire`](PositionGuard::acquire) is restored if the source
/// is seekable; forward-only sources stay consumed.
pub struct PositionGuard<'a, S: ByteSource + ?Sized> {
    source: &'a mut S,
    start: u64,
}

impl<'a, S: ByteSource + ?Sized> PositionGuard<'a, S> {
    pub fn acquire(source: &'a mut S) -> io::Result<Self> {
        let start = source.position()?;
        Ok(Self { source, start })
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Moves to `offset` bytes past the position the guard was acquired at.
    pub fn seek_from_start(&mut self, offset: u64) -> io::Result<()> {
        let target = self.start.checked_add(offset).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "seek past the end of u64")
        })?;
        self.source.seek_to(target)
    }
}

impl<S: ByteSource + ?Sized> Deref for PositionGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.source
    }
}

impl<S: ByteSource + ?Sized> DerefMut for PositionGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.source
    }
}

impl<S: ByteSource + ?Sized> Drop for PositionGuard<'_, S> {
    fn drop(&mut self) {
        if !self.source.is_seekable() {
            return;
        }
        if let Err(err) = self.source.seek_to(self.start) {
            warn!(start = self.start, %err, "failed to restore source position");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, ReadBytesExt};

    #[test]
    fn test_guard_restores_seekable() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3, 4, 5, 6]);
        cursor.set_position(1);
        {
            let mut guard = PositionGuard::acquire(&mut cursor).unwrap();
            guard.seek_from_start(2).unwrap();
            assert_eq!(guard.read_u8().unwrap(), 4);
        }
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_guard_restores_after_failed_read() {
        let mut cursor = Cursor::new(vec![1u8, 2]);
        let result = {
            let mut guard = PositionGuard::acquire(&mut cursor).unwrap();
            guard.read_u32::<BigEndian>()
        };
        assert!(result.is_err());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_unseekable_consumes() {
        let mut source = Unseekable::new(&[1u8, 2, 3, 4, 5][..]);
        {
            let mut guard = PositionGuard::acquire(&mut source).unwrap();
            assert_eq!(guard.read_u16::<BigEndian>().unwrap(), 0x0102);
        }
        assert_eq!(source.consumed(), 2);
        source.seek_to(4).unwrap();
        assert_eq!(source.read_u8().unwrap(), 5);
        let err = source.seek_to(0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_unseekable_forward_seek_past_end() {
        let mut source = Unseekable::new(&[1u8, 2, 3][..]);
        let err = source.seek_to(10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_replay_rewinds_forward_only_reader() {
        let mut replay = Replay::new(Unseekable::new(&[10u8, 20, 30, 40, 50][..]));
        assert_eq!(replay.read_u16::<BigEndian>().unwrap(), u16::from_be_bytes([10, 20]));
        replay.seek_to(0).unwrap();
        assert_eq!(replay.read_u8().unwrap(), 10);
        replay.seek_to(4).unwrap();
        assert_eq!(replay.read_u8().unwrap(), 50);
        assert_eq!(replay.recorded(), &[10, 20, 30, 40, 50]);
        replay.seek_to(1).unwrap();
        assert_eq!(replay.read_u16::<BigEndian>().unwrap(), u16::from_be_bytes([20, 30]));
    }

    #[test]
    fn test_replay_stops_recording_at_limit() {
        let data: Vec<u8> = (0..100).collect();
        let mut replay = Replay::with_limit(Unseekable::new(data.as_slice()), 8);
        assert_eq!(replay.read_u32::<BigEndian>().unwrap(), u32::from_be_bytes([0, 1, 2, 3]));
        replay.seek_to(0).unwrap();
        assert!(replay.is_seekable());

        replay.seek_to(90).unwrap();
        assert_eq!(replay.read_u8().unwrap(), 90);
        assert_eq!(replay.recorded(), &data[..8]);
        assert!(!replay.is_seekable());
        assert_eq!(replay.position().unwrap(), 91);

        let err = replay.seek_to(2).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        replay.seek_to(95).unwrap();
        assert_eq!(replay.read_u8().unwrap(), 95);
    }

    #[test]
    fn test_replay_guard_skips_restore_after_spill() {
        let data: Vec<u8> = (0..64).collect();
        let mut replay = Replay::with_limit(Unseekable::new(data.as_slice()), 4);
        {
            let mut guard = PositionGuard::acquire(&mut replay).unwrap();
            guard.seek_from_start(32).unwrap();
        }
        assert_eq!(replay.position().unwrap(), 32);
    }

    #[test]
    fn test_bufreader_seek_and_position() {
        let data: Vec<u8> = (0..=255).collect();
        let mut reader = BufReader::with_capacity(16, Cursor::new(data));
        reader.seek_to(200).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 200);
        reader.seek_to(3).unwrap();
        assert_eq!(ByteSource::position(&mut reader).unwrap(), 3);
        assert_eq!(reader.read_u8().unwrap(), 3);
    }

    #[test]
    fn test_skip() {
        let mut cursor = Cursor::new(vec![0u8; 8]);
        cursor.skip(5).unwrap();
        assert_eq!(cursor.position(), 5);
    }
}
