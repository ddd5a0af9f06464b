#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{from_bytes, to_bytes, Value};

fuzz_target!(|v: Value| {
    // Arbitrary trees can exceed wire limits (string length, depth), which
    // must surface as errors rather than panics. Whatever does encode must
    // decode.
    if let Ok(bs) = to_bytes("", &v) {
        let _ = from_bytes(&bs).unwrap();
    }
});
