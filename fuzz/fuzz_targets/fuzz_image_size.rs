#![no_main]

use imgpeek::{NoFallback, Sniffer, Unseekable};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let sniffer = Sniffer::new().fallback(NoFallback);

    let mut cursor = Cursor::new(data);
    let _ = sniffer.inspect(&mut cursor, None);
    assert_eq!(cursor.position(), 0);

    let _ = sniffer.inspect(&mut Unseekable::new(data), None);
});
