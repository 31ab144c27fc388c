#![no_main]
use eolscan::catalog::record::{records_to_schedules, ProductRecord};
use libfuzzer_sys::fuzz_target;

/// Fuzz the endoflife.date record adapter.
///
/// Decoding arbitrary JSON and converting whatever decodes must never
/// panic; conversion errors are expected outcomes.
fuzz_target!(|data: &[u8]| {
    if let Ok(records) = serde_json::from_slice::<Vec<ProductRecord>>(data) {
        let _ = records_to_schedules("fuzz", &records);
    }
});
