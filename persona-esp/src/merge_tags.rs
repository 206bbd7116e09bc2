//! Merge-tag dialects and content translation
//!
//! Providers with idiosyncratic hand-specified syntax get their own
//! dialect variant; everything else derives its tag mechanically from the
//! descriptor's `merge_tag_format`. The hand-specified literals are the
//! wire contract with real ESP template engines and must not drift.

use crate::registry::EspRegistry;
use persona_core::EspError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Native tag syntax family for a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeTagDialect {
    /// Mailchimp: `*|field|*`
    AsteriskPipe,
    /// Klaviyo: `{{ person|lookup:'field' }}`
    PersonLookup,
    /// Salesforce Marketing Cloud: `%%field%%`
    DoublePercent,
    /// Generic handlebars: `{{field}}`
    Handlebars,
    /// Derive from the descriptor's `merge_tag_format` by replacing the
    /// literal `TOKEN` marker.
    Template,
}

impl Default for MergeTagDialect {
    fn default() -> Self {
        MergeTagDialect::Template
    }
}

impl MergeTagDialect {
    /// Wrap a provider field name in this dialect's native tag syntax.
    pub fn wrap(&self, field: &str, merge_tag_format: &str) -> String {
        match self {
            MergeTagDialect::AsteriskPipe => format!("*|{}|*", field),
            MergeTagDialect::PersonLookup => format!("{{{{ person|lookup:'{}' }}}}", field),
            MergeTagDialect::DoublePercent => format!("%%{}%%", field),
            MergeTagDialect::Handlebars => format!("{{{{{}}}}}", field),
            MergeTagDialect::Template => merge_tag_format.replace("TOKEN", field),
        }
    }
}

/// Built-in mapping of catalog token keys to generic snake_case provider
/// field names. Callers overlay their own mapping on top; the caller wins
/// on collision.
pub fn default_token_mapping() -> BTreeMap<String, String> {
    [
        ("FIRSTNAME", "first_name"),
        ("LASTNAME", "last_name"),
        ("EMAIL", "email"),
        ("COMPANY", "company"),
        ("JOBTITLE", "job_title"),
        ("PHONE", "phone"),
        ("CITY", "city"),
        ("STATE", "state"),
        ("COUNTRY", "country"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl EspRegistry {
    /// Replace every canonical-bracket occurrence (`[KEY]`) of each mapped
    /// source key with the provider's native merge tag for the target
    /// field name.
    pub fn translate_to_merge_tags(
        &self,
        content: &str,
        esp_name: &str,
        token_mapping: Option<&BTreeMap<String, String>>,
    ) -> Result<String, EspError> {
        let descriptor = self.descriptor(esp_name)?;

        let mut mapping = default_token_mapping();
        if let Some(extra) = token_mapping {
            mapping.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let mut translated = content.to_string();
        for (source, target) in &mapping {
            let literal = format!("[{}]", source);
            if translated.contains(&literal) {
                translated = translated.replace(&literal, &descriptor.native_tag(target));
            }
        }
        debug!(esp = esp_name, "translated content to native merge tags");
        Ok(translated)
    }
}
