#![no_main]

use libfuzzer_sys::fuzz_target;
use mindata::{from_bytes_many, MinData, Options};

fuzz_target!(|data: &[u8]| {
    let md = MinData::new();
    let _ = from_bytes_many(data, Some(&md), &Options::new());
    let _ = from_bytes_many(data, Some(&md), &Options::new().with_compression_threshold(-1));
});
