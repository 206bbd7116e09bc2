//! Human-readable setup guide rendering
//!
//! Deterministic Markdown derived purely from one descriptor; no external
//! calls.

use crate::registry::EspRegistry;
use persona_core::EspError;

impl EspRegistry {
    /// Render a Markdown setup guide for one provider: features, merge-tag
    /// format, supported tokens, auth requirements, API endpoints, limits,
    /// and a worked `first_name` example.
    pub fn setup_guide(&self, esp_name: &str) -> Result<String, EspError> {
        let d = self.descriptor(esp_name)?;
        let mut out = String::new();

        out.push_str(&format!("# {} Setup Guide\n\n", d.display_name));
        out.push_str(&format!("Category: {}\n\n", d.category));

        out.push_str("## Features\n\n");
        for (label, enabled) in [
            ("Merge tags", d.features.merge_tags),
            ("Dynamic content", d.features.dynamic_content),
            ("API integration", d.features.api_integration),
            ("Webhooks", d.features.webhooks),
            ("Templates", d.features.templates),
            ("Segmentation", d.features.segmentation),
        ] {
            out.push_str(&format!(
                "- {} {}\n",
                if enabled { "[x]" } else { "[ ]" },
                label
            ));
        }
        out.push('\n');

        out.push_str("## Merge Tag Format\n\n");
        out.push_str(&format!("Tag template: `{}`\n\n", d.merge_tag_format));
        out.push_str(&format!(
            "Example: a recipient's first name is written as `{}`\n\n",
            d.native_tag("first_name")
        ));

        out.push_str("## Supported Tokens\n\n");
        if d.supported_tokens.is_empty() {
            out.push_str("This provider declares no native merge fields.\n\n");
        } else {
            for token in &d.supported_tokens {
                out.push_str(&format!("- `{}`\n", token));
            }
            out.push('\n');
        }

        out.push_str("## Authentication\n\n");
        match &d.authentication {
            Some(auth) => {
                out.push_str(&format!("Type: `{}`\n\nRequired fields:\n\n", auth.auth_type));
                for field in &auth.required_fields {
                    out.push_str(&format!("- `{}`\n", field));
                }
                out.push('\n');
            }
            None => out.push_str("No authentication configuration required.\n\n"),
        }

        if !d.api_endpoints.is_empty() {
            out.push_str("## API Endpoints\n\n");
            for (name, endpoint) in &d.api_endpoints {
                out.push_str(&format!("- {}: `{}`\n", name, endpoint));
            }
            out.push('\n');
        }

        if let Some(limits) = &d.limits {
            out.push_str("## Limits\n\n");
            if let Some(max) = limits.max_recipients {
                out.push_str(&format!("- Max recipients per send: {}\n", max));
            }
            if let Some(max) = limits.max_emails_per_hour {
                out.push_str(&format!("- Max emails per hour: {}\n", max));
            }
            if let Some(max) = limits.max_merge_tags {
                out.push_str(&format!("- Max merge tags per template: {}\n", max));
            }
            out.push('\n');
        }

        Ok(out)
    }
}
