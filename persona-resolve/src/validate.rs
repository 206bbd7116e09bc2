//! Standalone token validation and usage reporting
//!
//! Unlike full resolution, these operations are syntax-specific: only the
//! content type's canonical syntax is scanned.

use crate::resolver::TokenResolver;
use crate::syntax::{find_tokens, scan};
use persona_core::ContentType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Classification of the tokens found in one content string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValidation {
    /// True iff there are zero invalid tokens.
    pub is_valid: bool,
    /// Every bare key found, deduplicated in first-encountered order.
    pub found_tokens: Vec<String>,
    /// Found keys naming implemented catalog tokens.
    pub valid_tokens: Vec<String>,
    /// Found keys with no implemented catalog definition.
    pub invalid_tokens: Vec<String>,
    /// For each invalid key, the closest catalog key if any.
    pub suggestions: HashMap<String, String>,
}

/// Aggregate token usage over a set of content strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsageReport {
    pub total_occurrences: usize,
    pub unique_tokens: usize,
    pub frequency: HashMap<String, usize>,
    /// At most 10 entries, count-descending, ties broken by
    /// first-encountered order.
    pub top_tokens: Vec<(String, usize)>,
}

impl TokenResolver {
    /// Classify the tokens in `content` against the catalog. Valid means
    /// an implemented catalog token; for each invalid key the suggestion
    /// is the first catalog key matching by case-insensitive substring
    /// containment in either direction.
    pub fn validate(&self, content: &str, content_type: ContentType) -> TokenValidation {
        let found_tokens = find_tokens(content, content_type);
        let mut validation = TokenValidation {
            found_tokens: found_tokens.clone(),
            ..Default::default()
        };

        for key in found_tokens {
            if self.catalog().is_implemented(&key) {
                validation.valid_tokens.push(key);
            } else {
                if let Some(suggestion) = self.suggest(&key) {
                    validation.suggestions.insert(key.clone(), suggestion);
                }
                validation.invalid_tokens.push(key);
            }
        }

        validation.is_valid = validation.invalid_tokens.is_empty();
        validation
    }

    /// First implemented catalog key containing the candidate (or contained
    /// by it), case-insensitively. First match wins; no ranking.
    fn suggest(&self, candidate: &str) -> Option<String> {
        let lower = candidate.to_lowercase();
        self.catalog()
            .iter()
            .filter(|d| d.is_implemented)
            .find(|d| {
                let key = d.key.to_lowercase();
                key.contains(&lower) || lower.contains(&key)
            })
            .map(|d| d.key.clone())
    }

    /// Count token occurrences across many content strings under one
    /// content type's canonical syntax.
    pub fn usage_report(&self, contents: &[&str], content_type: ContentType) -> TokenUsageReport {
        let syntax = content_type.canonical_syntax();
        let mut frequency: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();
        let mut total = 0usize;

        for content in contents {
            for m in scan(content, syntax) {
                total += 1;
                if !frequency.contains_key(&m.key) {
                    first_seen.push(m.key.clone());
                }
                *frequency.entry(m.key).or_insert(0) += 1;
            }
        }

        let mut top: Vec<(String, usize)> = first_seen
            .iter()
            .map(|k| (k.clone(), frequency[k]))
            .collect();
        // Stable sort keeps first-encountered order within equal counts.
        top.sort_by(|a, b| b.1.cmp(&a.1));
        top.truncate(10);

        TokenUsageReport {
            total_occurrences: total,
            unique_tokens: frequency.len(),
            frequency,
            top_tokens: top,
        }
    }
}
