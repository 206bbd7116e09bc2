//! Resolution options and batch inputs

use persona_core::{ContentType, TokenValues};
use serde::{Deserialize, Serialize};

/// Options for a single resolution call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Selects the canonical syntax for NEWLY generated placeholders only;
    /// all four syntaxes are always scanned on input.
    pub content_type: ContentType,
    /// Values consulted when the merged value source has no entry.
    pub fallback_values: TokenValues,
    /// Overrides layered on top of the caller's value map (custom wins).
    pub custom_tokens: TokenValues,
    /// Abort with `MissingRequiredToken` on any unresolvable token.
    pub strict: bool,
    /// Leave unresolvable token literals untouched instead of substituting
    /// a generic placeholder.
    pub preserve_unresolved: bool,
}

/// Per-item overrides for batch resolution, merged on top of the shared
/// options. `None` scalars inherit the shared value; value maps are merged
/// with the item winning on key collision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveOverrides {
    pub content_type: Option<ContentType>,
    pub fallback_values: TokenValues,
    pub custom_tokens: TokenValues,
    pub strict: Option<bool>,
    pub preserve_unresolved: Option<bool>,
}

impl ResolveOverrides {
    /// Apply these overrides on top of a base option set.
    pub fn apply(&self, base: &ResolveOptions) -> ResolveOptions {
        let mut merged = base.clone();
        if let Some(ct) = self.content_type {
            merged.content_type = ct;
        }
        if let Some(strict) = self.strict {
            merged.strict = strict;
        }
        if let Some(preserve) = self.preserve_unresolved {
            merged.preserve_unresolved = preserve;
        }
        merged
            .fallback_values
            .extend(self.fallback_values.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
            .custom_tokens
            .extend(self.custom_tokens.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

/// One unit of work for `resolve_batch`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub content: String,
    pub overrides: ResolveOverrides,
}

impl BatchItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            overrides: ResolveOverrides::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_inherit_unset_scalars() {
        let base = ResolveOptions {
            content_type: ContentType::Email,
            strict: true,
            ..Default::default()
        };
        let merged = ResolveOverrides::default().apply(&base);
        assert_eq!(merged, base);
    }

    #[test]
    fn test_overrides_win_on_map_collision() {
        let mut base = ResolveOptions::default();
        base.fallback_values
            .insert("FIRSTNAME".to_string(), "friend".to_string());
        let mut overrides = ResolveOverrides::default();
        overrides
            .fallback_values
            .insert("FIRSTNAME".to_string(), "colleague".to_string());
        let merged = overrides.apply(&base);
        assert_eq!(
            merged.fallback_values.get("FIRSTNAME").map(String::as_str),
            Some("colleague")
        );
    }
}
