#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate dnswire;

use dnswire::{Message, ParseOptions};

fuzz_target!(|data: &[u8]| {
    // Decoding must fail cleanly, never panic.
    let lenient = ParseOptions {
        allow_error_rcode: true,
        allow_trailing_bytes: true,
    };

    if let Ok(m) = Message::from_slice_with(data, lenient) {
        // Anything decoded must also display and re-encode without panicking.
        let _ = m.to_string();
        let _ = m.to_vec();
    }
});
