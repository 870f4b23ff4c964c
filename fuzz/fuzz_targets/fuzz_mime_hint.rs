#![no_main]

use imgpeek::parse_mime_hint;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|hint: &str| {
    let _ = parse_mime_hint(hint);
});
