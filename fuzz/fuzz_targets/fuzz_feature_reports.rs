//! Fuzzes the DK1 feature report decoders.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_feature_reports
#![no_main]
use libfuzzer_sys::fuzz_target;
use rift_hid_dk1_protocol::{ByteCursor, KeepAlive, SensorConfig, SensorDisplayInfo, SensorRange};

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes.
    let size = data.len();
    let _ = SensorRange::decode(&mut ByteCursor::from_bytes(data), size);
    let _ = SensorDisplayInfo::decode(&mut ByteCursor::from_bytes(data), size);
    let _ = SensorConfig::decode(&mut ByteCursor::from_bytes(data), size);
    let _ = KeepAlive::decode(&mut ByteCursor::from_bytes(data), size);
});
