//! Fuzz test for the bracket syntax scanner
//!
//! Feeds arbitrary UTF-8 at `scan_all` to find panics, infinite loops,
//! or span bookkeeping bugs.
//!
//! Run with: cargo +nightly fuzz run scanner_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use persona_resolve::syntax::scan_all;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let matches = scan_all(input);

        // Invariants that must hold for any input:
        // 1. Spans are in-bounds and well-formed.
        for m in &matches {
            assert!(m.start < m.end, "span start should be < end");
            assert!(m.end <= input.len(), "span must be in bounds");
            assert_eq!(&input[m.start..m.end], m.literal, "span/literal mismatch");
        }

        // 2. Accepted spans never overlap.
        for pair in matches.windows(2) {
            assert!(pair[0].end <= pair[1].start, "accepted spans must not overlap");
        }
    }
});
