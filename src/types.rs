use serde::Serialize;
use std::fmt;

pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Bmp,
    Gif,
    Jpeg,
    Unknown,
}

impl ImageFormat {
    /// Order in which signatures are probed when no usable hint is given.
    pub const PROBE_ORDER: [ImageFormat; 4] = [Self::Png, Self::Gif, Self::Bmp, Self::Jpeg];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Bmp => "BMP",
            Self::Gif => "GIF",
            Self::Jpeg => "JPEG",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Jpeg => "jpg",
            Self::Unknown => "bin",
        }
    }

    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Bmp => "image/bmp",
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
            Self::Unknown => OCTET_STREAM,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Pixel dimensions as stored in the image header.
///
/// Every native field fits in `i64` without loss: PNG stores `u32`, GIF and
/// JPEG store `u16`, BMP stores signed `i32`. BMP values are passed through
/// unchanged, so a negative height (top-down row order) stays negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub width: i64,
    pub height: i64,
}

impl Size {
    #[must_use]
    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// A negative BMP height marks rows stored top to bottom.
    #[must_use]
    pub const fn is_top_down(&self) -> bool {
        self.height < 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Result of a detection call: the container that was recognised and the
/// dimensions read from it. `format` is `Unknown` when the fallback decoder
/// produced the size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub format: ImageFormat,
    #[serde(flatten)]
    pub size: Size,
}
