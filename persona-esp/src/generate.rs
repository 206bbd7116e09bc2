//! End-to-end personalized content generation
//!
//! Resolution (preserve-unresolved) followed by merge-tag translation and
//! optional per-recipient image-URL personalization.

use crate::registry::EspRegistry;
use persona_core::{ContentType, PersonaResult, TokenValues};
use persona_resolve::ResolveOptions;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;
use url::Url;

/// Marker a template uses to position the personalized image tag.
pub const IMAGE_MARKER: &str = "[PERSONALIZED_IMAGE]";

const DEFAULT_ALT_TEXT: &str = "Personalized image";

/// Caller knobs for `generate_personalized_content`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Overrides layered on top of the recipient data (override wins).
    pub custom_tokens: TokenValues,
    /// Extra merge-tag mapping entries; caller wins on collision.
    pub token_mapping: BTreeMap<String, String>,
    pub alt_text: Option<String>,
    /// Inline CSS for the generated `<img>` tag.
    pub image_style: Option<String>,
}

/// Output of one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub email_content: String,
    pub personalized_image_url: Option<String>,
    pub resolved_tokens: BTreeSet<String>,
    pub warnings: Vec<String>,
}

impl EspRegistry {
    /// Resolve `template` against `recipient_data`, translate the outcome
    /// into the provider's native merge tags, and (when `image_url` is
    /// given) splice in a per-recipient personalized image tag at the
    /// `[PERSONALIZED_IMAGE]` marker. Missing recipient fields never fail:
    /// their literals survive resolution and become merge tags or pass
    /// through untouched.
    pub fn generate_personalized_content(
        &self,
        template: &str,
        recipient_data: &TokenValues,
        esp_name: &str,
        image_url: Option<&str>,
        options: &GenerateOptions,
    ) -> PersonaResult<GeneratedContent> {
        let descriptor = self.descriptor(esp_name)?;

        let resolve_options = ResolveOptions {
            content_type: ContentType::Email,
            custom_tokens: options.custom_tokens.clone(),
            preserve_unresolved: true,
            ..Default::default()
        };
        let resolution = self
            .resolver()
            .resolve(template, recipient_data, &resolve_options)?;

        let mut email_content = self.translate_to_merge_tags(
            &resolution.content,
            esp_name,
            Some(&options.token_mapping),
        )?;

        let mut warnings = resolution.warnings;
        let mut personalized_image_url = None;
        if let Some(raw_url) = image_url {
            let url = personalize_image_url(
                raw_url,
                recipient_data,
                descriptor,
                &mut warnings,
            );

            let alt = options.alt_text.as_deref().unwrap_or(DEFAULT_ALT_TEXT);
            let style = options.image_style.as_deref().unwrap_or("");
            let image_tag = descriptor
                .image_tag_format
                .replace("IMAGE_URL", &url)
                .replace("ALT_TEXT", alt)
                .replace("IMAGE_STYLE", style);
            email_content = email_content.replace(IMAGE_MARKER, &image_tag);
            personalized_image_url = Some(url);
        }

        Ok(GeneratedContent {
            email_content,
            personalized_image_url,
            resolved_tokens: resolution.resolved_tokens,
            warnings,
        })
    }

    /// Generate independently for each recipient, preserving input order.
    pub fn generate_batch(
        &self,
        template: &str,
        recipients: &[TokenValues],
        esp_name: &str,
        image_url: Option<&str>,
        options: &GenerateOptions,
    ) -> Vec<PersonaResult<GeneratedContent>> {
        recipients
            .iter()
            .map(|recipient| {
                self.generate_personalized_content(
                    template, recipient, esp_name, image_url, options,
                )
            })
            .collect()
    }
}

/// Append each recipient field that the provider supports (or that is
/// `custom_`-prefixed) as a URL-encoded query parameter. Fields are added
/// in sorted key order so per-recipient URLs are deterministic.
fn personalize_image_url(
    raw_url: &str,
    recipient_data: &TokenValues,
    descriptor: &crate::descriptor::EspDescriptor,
    warnings: &mut Vec<String>,
) -> String {
    let mut url = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(e) => {
            warn!(url = raw_url, error = %e, "image URL not personalizable");
            warnings.push(format!("Image URL could not be parsed: {}", e));
            return raw_url.to_string();
        }
    };

    let mut keys: Vec<&String> = recipient_data.keys().collect();
    keys.sort();
    {
        let mut pairs = url.query_pairs_mut();
        for key in keys {
            let lower = key.to_lowercase();
            if descriptor.supports_field(key) || lower.starts_with("custom_") {
                pairs.append_pair(&lower, &recipient_data[key]);
            }
        }
    }
    url.to_string()
}
