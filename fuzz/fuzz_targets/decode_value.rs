#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{from_bytes_with_opts, to_bytes, DeOpts};

fuzz_target!(|data: &[u8]| {
    let opts = DeOpts::new().max_seq_len(100);
    if let Ok((name, v)) = from_bytes_with_opts(data, opts) {
        // Anything we decoded must encode again.
        let _bs = to_bytes(&name, &v).unwrap();
    }
});
