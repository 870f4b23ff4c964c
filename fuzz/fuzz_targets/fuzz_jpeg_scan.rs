#![no_main]

use imgpeek::decode_jpeg;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let mut jpeg = vec![0xFF, 0xD8];
    jpeg.extend_from_slice(data);

    let mut cursor = Cursor::new(jpeg);
    let _ = decode_jpeg(&mut cursor);
    assert_eq!(cursor.position(), 0);
});
