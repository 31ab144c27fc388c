#![no_main]
use libfuzzer_sys::fuzz_target;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz Dockerfile base image extraction.
///
/// Also wraps the input into a FROM line so the mutator reaches the
/// image reference grammar instead of dying on the line prefix.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = eolscan::dockerfile::extract_base_images(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!("FROM {s}\nFROM {s} AS build\n");
            for image in eolscan::dockerfile::extract_base_images(&wrapped) {
                let _ = image.base_name();
            }
        }
    }
});
