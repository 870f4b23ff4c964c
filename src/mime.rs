//! MIME hints: validation, alias normalisation and format mapping.
//!
//! Hints come from outside (upload headers, file extensions) and are never
//! authoritative. The header decoders re-check the signature regardless.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{Result, SniffError};
use crate::types::ImageFormat;

static MIME_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^
        (?:
            application|audio|chemical|example|image|message|model|multipart|text|video
            |
            x-\w+(?:[-+._]{0,2}\w)?
        )
        /
        \w+
        (?:[-+._]{0,2}\w)+   # up to two separators between word chars, e.g. x-c++hdr
        \+?                  # trailing plus, e.g. amr-wb+
        $",
    )
    .expect("MIME grammar must compile")
});

/// Lower-cases `hint`, drops any `;` parameters, checks the `type/subtype`
/// grammar and folds irregular aliases onto their canonical names.
pub fn normalize_mime(hint: &str) -> Result<String> {
    let essence = hint
        .split_once(';')
        .map_or(hint, |(essence, _)| essence)
        .trim()
        .to_ascii_lowercase();

    if !MIME_TYPE.is_match(&essence) {
        return Err(SniffError::InvalidMimeHint(format!(
            "{hint:?} does not appear to be a valid MIME type"
        )));
    }

    let canonical = match essence.as_str() {
        "image/pjpeg" | "image/jpg" | "image/jpe" => "image/jpeg",
        "image/x-png" => "image/png",
        "image/x-ms-bmp" | "image/x-bmp" => "image/bmp",
        _ => return Ok(essence),
    };
    Ok(canonical.to_owned())
}

/// Maps a hint onto one of the formats with a header decoder.
pub fn parse_mime_hint(hint: &str) -> Result<ImageFormat> {
    let mime = normalize_mime(hint)?;
    ImageFormat::PROBE_ORDER
        .into_iter()
        .find(|format| format.mime_type() == mime)
        .ok_or_else(|| SniffError::InvalidMimeHint(format!("no supported image format for {mime}")))
}

/// Best-effort hint from a file name.
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let format = match extension.as_str() {
        "png" => ImageFormat::Png,
        "bmp" | "dib" => ImageFormat::Bmp,
        "gif" => ImageFormat::Gif,
        "jpg" | "jpeg" | "jpe" | "jfif" => ImageFormat::Jpeg,
        _ => return None,
    };
    Some(format.mime_type())
}
