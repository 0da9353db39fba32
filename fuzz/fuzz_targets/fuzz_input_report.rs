//! Fuzzes the DK1 input report dispatcher and tracker message decoder.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_input_report
#![no_main]
use libfuzzer_sys::fuzz_target;
use rift_hid_dk1_protocol::{ByteCursor, decode_input_report};

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes, whatever size the read claims.
    let mut cursor = ByteCursor::from_bytes(data);
    let _ = decode_input_report(&mut cursor, data.len());
    let _ = cursor.read_i21();
});
