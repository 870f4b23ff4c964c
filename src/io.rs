//! Thin file wrapper around the dispatcher.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;
use crate::mime::mime_from_extension;
use crate::sniffer::Sniffer;
use crate::types::{ImageInfo, Size};

/// Large enough for the fixed-offset headers and typical JPEG APPn runs.
pub const READ_BUFFER_SIZE: usize = 16 * 1024;

pub fn open_source(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::with_capacity(READ_BUFFER_SIZE, file))
}

impl Sniffer {
    /// Opens `path` and inspects it with exactly the given hint.
    pub fn inspect_path(&self, path: impl AsRef<Path>, mime_hint: Option<&str>) -> Result<ImageInfo> {
        let mut source = open_source(path)?;
        self.inspect(&mut source, mime_hint)
    }
}

/// Reads the dimensions of the image file at `path`, using its extension as
/// a MIME hint.
pub fn image_size_from_path(path: impl AsRef<Path>) -> Result<Size> {
    let path = path.as_ref();
    Sniffer::shared()
        .inspect_path(path, mime_from_extension(path))
        .map(|info| info.size)
}
