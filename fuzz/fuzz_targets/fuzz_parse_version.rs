#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the lenient version parser.
///
/// The parser must never panic: it sees raw subprocess output and
/// arbitrary container tags.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = eolscan::model::numeric_prefix(s);
        if let Some(parsed) = eolscan::model::parse_loose(s) {
            // Re-parsing the normalized form must agree on the version.
            let normalized = parsed.version.to_string();
            let reparsed = eolscan::model::parse_loose(&normalized).unwrap();
            assert_eq!(reparsed.version, parsed.version);
        }
    }
});
