//! Bracket syntax scanning and format conversion

use once_cell::sync::Lazy;
use persona_core::{BracketSyntax, ContentType};
use regex::Regex;

// ============================================================================
// SCAN PATTERNS
// ============================================================================

// Token name pattern is uppercase letters and underscore only. Keys with
// digits never match any scanner.
static SQUARE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([A-Z_]+)\]").unwrap());
static CURLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([A-Z_]+)\}").unwrap());
static UNDERSCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__([A-Z_]+?)__").unwrap());
static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"%([A-Z_]+)%").unwrap());

fn pattern(syntax: BracketSyntax) -> &'static Regex {
    match syntax {
        BracketSyntax::Square => &SQUARE_RE,
        BracketSyntax::Curly => &CURLY_RE,
        BracketSyntax::DoubleUnderscore => &UNDERSCORE_RE,
        BracketSyntax::Percent => &PERCENT_RE,
    }
}

/// One token occurrence located in a content string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    pub syntax: BracketSyntax,
    /// Byte span of the full literal (wrapper included) in the scanned string.
    pub start: usize,
    pub end: usize,
    /// The full matched literal, e.g. `[FIRSTNAME]`.
    pub literal: String,
    /// The bare token key, e.g. `FIRSTNAME`.
    pub key: String,
}

/// Scan one syntax's pattern over `content`, returning matches in order.
pub fn scan(content: &str, syntax: BracketSyntax) -> Vec<TokenMatch> {
    pattern(syntax)
        .captures_iter(content)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            TokenMatch {
                syntax,
                start: whole.start(),
                end: whole.end(),
                literal: whole.as_str().to_string(),
                key: caps.get(1).unwrap().as_str().to_string(),
            }
        })
        .collect()
}

/// Scan all four syntaxes against the SAME original string and return the
/// accepted matches ordered by position. When spans overlap across
/// syntaxes (a curly-wrapped `{__X__}`, say), the earlier syntax in scan
/// order wins, matching the sequential-rewrite reference behavior.
pub fn scan_all(content: &str) -> Vec<TokenMatch> {
    let mut accepted: Vec<TokenMatch> = Vec::new();
    for syntax in BracketSyntax::ALL {
        for m in scan(content, syntax) {
            let overlaps = accepted
                .iter()
                .any(|a| m.start < a.end && a.start < m.end);
            if !overlaps {
                accepted.push(m);
            }
        }
    }
    accepted.sort_by_key(|m| m.start);
    accepted
}

/// Bare token keys found under one content type's canonical syntax,
/// deduplicated in first-encountered order.
pub fn find_tokens(content: &str, content_type: ContentType) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    scan(content, content_type.canonical_syntax())
        .into_iter()
        .filter(|m| seen.insert(m.key.clone()))
        .map(|m| m.key)
        .collect()
}

/// Rewrite every token under `from`'s canonical syntax into `to`'s
/// canonical syntax. Tokens in other syntaxes are left untouched.
pub fn convert_format(content: &str, from: ContentType, to: ContentType) -> String {
    let to_syntax = to.canonical_syntax();
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for m in scan(content, from.canonical_syntax()) {
        out.push_str(&content[last..m.start]);
        out.push_str(&to_syntax.wrap(&m.key));
        last = m.end;
    }
    out.push_str(&content[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_square_literal() {
        let matches = scan("Hello [FIRSTNAME]!", BracketSyntax::Square);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].literal, "[FIRSTNAME]");
        assert_eq!(matches[0].key, "FIRSTNAME");
    }

    #[test]
    fn test_scan_underscore_key_with_inner_underscore() {
        let matches = scan("__FIRST_NAME__", BracketSyntax::DoubleUnderscore);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "FIRST_NAME");
    }

    #[test]
    fn test_scan_curly_inside_double_braces() {
        // `{{FIRSTNAME}}` still yields FIRSTNAME under the curly pattern.
        let matches = scan("Hi {{FIRSTNAME}}", BracketSyntax::Curly);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "FIRSTNAME");
    }

    #[test]
    fn test_scan_rejects_lowercase_and_digits() {
        assert!(scan("[firstname]", BracketSyntax::Square).is_empty());
        assert!(scan("[TOKEN1]", BracketSyntax::Square).is_empty());
    }

    #[test]
    fn test_scan_all_orders_by_position() {
        let matches = scan_all("%A% then [B] then {C}");
        let keys: Vec<&str> = matches.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_scan_all_overlap_prefers_scan_order() {
        // The curly match covers the inner underscore literal; underscore
        // comes later in scan order and is dropped.
        let matches = scan_all("{__TOKEN__}");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].syntax, BracketSyntax::Curly);
        assert_eq!(matches[0].key, "__TOKEN__");
    }

    #[test]
    fn test_convert_format_rewrites_only_source_syntax() {
        let out = convert_format(
            "[FIRSTNAME] and {LASTNAME}",
            ContentType::Prompt,
            ContentType::Sms,
        );
        assert_eq!(out, "%FIRSTNAME% and {LASTNAME}");
    }

    #[test]
    fn test_convert_format_roundtrip_restores_keys() {
        let original = "Hi [FIRSTNAME], [OFFER_EXPIRY] is soon";
        let there = convert_format(original, ContentType::Prompt, ContentType::Email);
        let back = convert_format(&there, ContentType::Email, ContentType::Prompt);
        assert_eq!(back, original);
    }

    #[test]
    fn test_find_tokens_dedupes_in_order() {
        let found = find_tokens("[A] [B] [A] [C]", ContentType::Prompt);
        assert_eq!(found, vec!["A", "B", "C"]);
    }
}
