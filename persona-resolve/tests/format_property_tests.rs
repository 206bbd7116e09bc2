//! Property tests for format conversion and substitution

use persona_core::ContentType;
use persona_resolve::{convert_format, find_tokens, ResolveOptions, TokenResolver};
use proptest::prelude::*;
use std::collections::HashMap;

// ============================================================================
// GENERATORS
// ============================================================================

/// Token keys the double-underscore syntax can round-trip: uppercase
/// segments joined by single underscores, no leading/trailing underscore.
fn arb_token_key() -> impl Strategy<Value = String> {
    proptest::collection::vec("[A-Z]{1,6}", 1..3).prop_map(|segments| segments.join("_"))
}

fn arb_content_type() -> impl Strategy<Value = ContentType> {
    prop_oneof![
        Just(ContentType::Prompt),
        Just(ContentType::Email),
        Just(ContentType::Sms),
        Just(ContentType::Marketing),
        Just(ContentType::Social),
    ]
}

/// Interleave literal words with canonical-syntax tokens for `ct`.
fn build_content(keys: &[String], ct: ContentType) -> String {
    let syntax = ct.canonical_syntax();
    let mut out = String::from("intro ");
    for key in keys {
        out.push_str(&syntax.wrap(key));
        out.push_str(" filler ");
    }
    out
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// Converting A -> B -> A restores the same bare token keys.
    #[test]
    fn convert_format_roundtrip_preserves_keys(
        keys in proptest::collection::vec(arb_token_key(), 0..6),
        a in arb_content_type(),
        b in arb_content_type(),
    ) {
        let content = build_content(&keys, a);
        let converted = convert_format(&content, a, b);
        let back = convert_format(&converted, b, a);
        prop_assert_eq!(find_tokens(&back, a), find_tokens(&content, a));
    }

    /// After resolution with non-empty values for every key, no wrapper
    /// syntax remains for those keys in the output.
    #[test]
    fn resolution_removes_all_wrappers_for_valued_keys(
        keys in proptest::collection::vec(arb_token_key(), 1..6),
        ct in arb_content_type(),
    ) {
        let content = build_content(&keys, ct);
        let values: HashMap<String, String> = keys
            .iter()
            .map(|k| (k.clone(), "v".to_string()))
            .collect();
        let resolver = TokenResolver::default();
        let options = ResolveOptions { content_type: ct, ..Default::default() };
        let result = resolver.resolve(&content, &values, &options).unwrap();
        for key in &keys {
            let wrapped = ct.canonical_syntax().wrap(key);
            prop_assert!(!result.content.contains(&wrapped));
        }
    }

    /// Content with no tokens resolves to itself with empty diagnostics.
    #[test]
    fn tokenless_content_is_a_fixed_point(words in "[a-z ,.!?]{0,80}") {
        let resolver = TokenResolver::default();
        let result = resolver
            .resolve(&words, &HashMap::new(), &ResolveOptions::default())
            .unwrap();
        prop_assert_eq!(result.content, words);
        prop_assert!(result.resolved_tokens.is_empty());
        prop_assert!(result.missing_tokens.is_empty());
        prop_assert!(result.warnings.is_empty());
    }
}
