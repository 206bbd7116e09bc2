//! Token resolution engine

use crate::options::{BatchItem, ResolveOptions};
use crate::syntax::{scan_all, TokenMatch};
use persona_core::{BracketSyntax, ResolveError, TokenCatalog, TokenValues};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

// ============================================================================
// RESOLUTION RESULT
// ============================================================================

/// Outcome of one resolution call. Created fresh per call; `resolved_tokens`
/// and `missing_tokens` never overlap for the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub content: String,
    /// Keys substituted, or explicitly preserved under `preserve_unresolved`.
    pub resolved_tokens: BTreeSet<String>,
    /// Keys with no value and no fallback under lenient mode.
    pub missing_tokens: BTreeSet<String>,
    /// Reserved for future syntactic-invalid cases.
    pub invalid_tokens: BTreeSet<String>,
    /// One human-readable diagnostic per notable event, in scan order.
    pub warnings: Vec<String>,
}

/// How one unique (syntax, key) occurrence is handled during rebuild.
#[derive(Debug, Clone)]
enum Outcome {
    Substitute(String),
    Preserve,
}

// ============================================================================
// TOKEN RESOLVER
// ============================================================================

/// Resolver over a token catalog. The catalog is only consulted by the
/// validation operations; plain resolution never rejects unknown keys.
#[derive(Debug, Clone)]
pub struct TokenResolver {
    catalog: TokenCatalog,
}

impl TokenResolver {
    pub fn new(catalog: TokenCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TokenCatalog {
        &self.catalog
    }

    /// Resolve every token occurrence in `content` against `values`,
    /// according to the precedence in `options`:
    /// merged value → fallback → preserve → strict abort → placeholder.
    ///
    /// All four bracket syntaxes are scanned against the original string;
    /// substitutions are applied positionally in a single rebuild so
    /// resolved values containing bracket characters are never re-scanned.
    pub fn resolve(
        &self,
        content: &str,
        values: &TokenValues,
        options: &ResolveOptions,
    ) -> Result<ResolutionResult, ResolveError> {
        if content.is_empty() {
            return Ok(ResolutionResult::default());
        }

        // Explicit values with custom overrides layered on top.
        let mut merged = values.clone();
        merged.extend(
            options
                .custom_tokens
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        let matches = scan_all(content);
        let mut result = ResolutionResult::default();
        // Same literal within the same syntax is decided once; every
        // occurrence then shares the outcome. The same bare key under two
        // syntaxes stays two independent events.
        let mut outcomes: HashMap<(BracketSyntax, String), Outcome> = HashMap::new();

        for m in &matches {
            let slot = (m.syntax, m.key.clone());
            if outcomes.contains_key(&slot) {
                continue;
            }
            let outcome = self.decide(m, &merged, options, &mut result)?;
            outcomes.insert(slot, outcome);
        }

        // Single positional rebuild over the original string.
        let mut out = String::with_capacity(content.len());
        let mut last = 0;
        for m in &matches {
            out.push_str(&content[last..m.start]);
            match &outcomes[&(m.syntax, m.key.clone())] {
                Outcome::Substitute(value) => out.push_str(value),
                Outcome::Preserve => out.push_str(&m.literal),
            }
            last = m.end;
        }
        out.push_str(&content[last..]);
        result.content = out;

        debug!(
            resolved = result.resolved_tokens.len(),
            missing = result.missing_tokens.len(),
            warnings = result.warnings.len(),
            "token resolution complete"
        );
        Ok(result)
    }

    /// Precedence decision for one unique (syntax, key) occurrence.
    /// Empty-string values count as absent and fall through.
    fn decide(
        &self,
        m: &TokenMatch,
        merged: &TokenValues,
        options: &ResolveOptions,
        result: &mut ResolutionResult,
    ) -> Result<Outcome, ResolveError> {
        if let Some(value) = merged.get(&m.key).filter(|v| !v.is_empty()) {
            result.resolved_tokens.insert(m.key.clone());
            return Ok(Outcome::Substitute(value.clone()));
        }

        if let Some(fallback) = options.fallback_values.get(&m.key).filter(|v| !v.is_empty()) {
            result.resolved_tokens.insert(m.key.clone());
            result
                .warnings
                .push(format!("Used fallback value for token {}", m.key));
            warn!(token = %m.key, "used fallback value");
            return Ok(Outcome::Substitute(fallback.clone()));
        }

        if options.preserve_unresolved {
            // Known but unresolved; the literal stays put for a later
            // translation pass.
            result.resolved_tokens.insert(m.key.clone());
            result
                .warnings
                .push(format!("Token {} preserved unresolved", m.literal));
            return Ok(Outcome::Preserve);
        }

        if options.strict {
            return Err(ResolveError::MissingRequiredToken { key: m.key.clone() });
        }

        let placeholder = options.content_type.placeholder(&m.key);
        result.missing_tokens.insert(m.key.clone());
        result.warnings.push(format!(
            "No value for token {}; substituted placeholder {}",
            m.key, placeholder
        ));
        warn!(token = %m.key, "substituted placeholder for missing token");
        Ok(Outcome::Substitute(placeholder))
    }

    /// Resolve a list of items independently. Order-preserving; one item's
    /// strict-mode failure does not affect the others.
    pub fn resolve_batch(
        &self,
        items: &[BatchItem],
        shared_values: &TokenValues,
        shared_options: &ResolveOptions,
    ) -> Vec<Result<ResolutionResult, ResolveError>> {
        items
            .iter()
            .map(|item| {
                let options = item.overrides.apply(shared_options);
                self.resolve(&item.content, shared_values, &options)
            })
            .collect()
    }
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new(TokenCatalog::builtin())
    }
}
