#![allow(dead_code)]

pub const PNG_SIG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

pub fn make_png_chunk(chunk_type: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut chunk = Vec::new();
    chunk.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    chunk.extend_from_slice(chunk_type);
    chunk.extend_from_slice(payload);
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(payload);
    chunk.extend_from_slice(&hasher.finalize().to_be_bytes());
    chunk
}

pub fn make_png(width: u32, height: u32) -> Vec<u8> {
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);

    let mut png = PNG_SIG.to_vec();
    png.extend_from_slice(&make_png_chunk(b"IHDR", &ihdr));
    png.extend_from_slice(&make_png_chunk(b"IDAT", &[0x78, 0x9C, 0x63, 0x00, 0x00]));
    png.extend_from_slice(&make_png_chunk(b"IEND", &[]));
    png
}

pub fn make_bmp(width: i32, height: i32) -> Vec<u8> {
    let mut bmp = b"BM".to_vec();
    bmp.extend_from_slice(&70u32.to_le_bytes());
    bmp.extend_from_slice(&[0, 0, 0, 0]);
    bmp.extend_from_slice(&54u32.to_le_bytes());
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&width.to_le_bytes());
    bmp.extend_from_slice(&height.to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes());
    bmp.extend_from_slice(&24u16.to_le_bytes());
    bmp.resize(70, 0);
    bmp
}

pub fn make_gif(version: &[u8; 3], width: u16, height: u16) -> Vec<u8> {
    let mut gif = b"GIF".to_vec();
    gif.extend_from_slice(version);
    gif.extend_from_slice(&width.to_le_bytes());
    gif.extend_from_slice(&height.to_le_bytes());
    gif.extend_from_slice(&[0x00, 0x00, 0x00, 0x3B]);
    gif
}

pub fn jfif_app0() -> Vec<u8> {
    let mut app0 = vec![0xFF, 0xE0, 0x00, 0x10];
    app0.extend_from_slice(b"JFIF\x00\x01\x01\x00\x00\x48\x00\x48\x00\x00");
    app0
}

pub fn exif_app1() -> Vec<u8> {
    let mut app1 = vec![0xFF, 0xE1, 0x00, 0x10];
    app1.extend_from_slice(b"Exif\x00\x00");
    app1.extend_from_slice(&[0x4D, 0x4D, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
    app1
}

pub fn sof(marker: u8, height: u16, width: u16) -> Vec<u8> {
    let mut segment = vec![0xFF, marker, 0x00, 0x11, 0x08];
    segment.extend_from_slice(&height.to_be_bytes());
    segment.extend_from_slice(&width.to_be_bytes());
    segment.extend_from_slice(&[0x03, 0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01]);
    segment
}

pub fn make_jpeg(height: u16, width: u16) -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8];
    jpeg.extend_from_slice(&jfif_app0());
    jpeg.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x43, 0x00]);
    jpeg.extend_from_slice(&[0x10; 64]);
    jpeg.extend_from_slice(&sof(0xC0, height, width));
    jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]);
    jpeg.extend_from_slice(&[0x12, 0x34, 0x56]);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Extended WebP header (VP8X); none of the built-in decoders know it.
pub fn make_webp(width: u32, height: u32) -> Vec<u8> {
    let mut webp = b"RIFF".to_vec();
    webp.extend_from_slice(&22u32.to_le_bytes());
    webp.extend_from_slice(b"WEBPVP8X");
    webp.extend_from_slice(&10u32.to_le_bytes());
    webp.extend_from_slice(&[0, 0, 0, 0]);
    webp.extend_from_slice(&(width - 1).to_le_bytes()[..3]);
    webp.extend_from_slice(&(height - 1).to_le_bytes()[..3]);
    webp
}
