//! Image format and dimension detection from a few header bytes.
//!
//! PNG, GIF, BMP and JPEG are recognised by their signatures and their
//! dimensions read straight from the header; anything else is handed to a
//! generic fallback decoder. No pixels are ever decoded.

pub mod detect;
pub mod endian;
mod error;
pub mod fallback;
pub mod formats;
pub mod io;
pub mod mime;
pub mod signatures;
pub mod sniffer;
pub mod source;
pub mod types;

pub use detect::{Resolution, probe, resolve, resolve_with, sniff_mime};
pub use error::{Result, SniffError};
pub use fallback::{FallbackDecoder, ImagesizeFallback, NoFallback};
pub use formats::{decode_bmp, decode_gif, decode_header, decode_jpeg, decode_png};
pub use io::image_size_from_path;
pub use mime::{mime_from_extension, parse_mime_hint};
pub use signatures::{is_bmp, is_gif, is_image_type, is_jpeg, is_png};
pub use sniffer::{SniffOptions, Sniffer, get_image_size};
pub use source::{ByteSource, PositionGuard, REPLAY_PREFIX, Replay, Seekable, Unseekable};
pub use types::{ImageFormat, ImageInfo, Size};
