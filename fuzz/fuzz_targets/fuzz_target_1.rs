#![no_main]
use libfuzzer_sys::fuzz_target;

use jsontree::parse_bytes;

fuzz_target!(|data: &[u8]| {
    // Parsing either builds a tree or reports a positioned error; any panic
    // (including stack exhaustion on deep nesting) is a bug.
    let _ = parse_bytes(data);
});
