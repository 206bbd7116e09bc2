//! Fuzz test for lenient token resolution
//!
//! Resolution in default (lenient, non-strict) mode must never panic and
//! must keep its result sets disjoint for any input content.
//!
//! Run with: cargo +nightly fuzz run resolver_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use persona_resolve::{ResolveOptions, TokenResolver};
use std::collections::HashMap;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let resolver = TokenResolver::default();
        let mut values = HashMap::new();
        values.insert("FIRSTNAME".to_string(), "John".to_string());
        values.insert("EMPTY".to_string(), String::new());

        let result = resolver
            .resolve(input, &values, &ResolveOptions::default())
            .expect("lenient resolution never fails");

        for key in &result.resolved_tokens {
            assert!(
                !result.missing_tokens.contains(key),
                "resolved and missing must be disjoint"
            );
        }
    }
});
