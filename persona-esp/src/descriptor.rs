//! ESP descriptor data types

use crate::merge_tags::MergeTagDialect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default `<img>` template used by providers without a bespoke one.
pub const DEFAULT_IMAGE_TAG_FORMAT: &str =
    r#"<img src="IMAGE_URL" alt="ALT_TEXT" style="IMAGE_STYLE" />"#;

/// Provider category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EspCategory {
    Marketing,
    Transactional,
    Crm,
}

impl EspCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EspCategory::Marketing => "marketing",
            EspCategory::Transactional => "transactional",
            EspCategory::Crm => "crm",
        }
    }
}

impl fmt::Display for EspCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EspCategory {
    type Err = EspCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marketing" => Ok(EspCategory::Marketing),
            "transactional" => Ok(EspCategory::Transactional),
            "crm" => Ok(EspCategory::Crm),
            other => Err(EspCategoryParseError(other.to_string())),
        }
    }
}

/// Error when parsing an invalid ESP category string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EspCategoryParseError(pub String);

impl fmt::Display for EspCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid ESP category: {}", self.0)
    }
}

impl std::error::Error for EspCategoryParseError {}

/// Capability flags advertised by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EspFeatures {
    pub merge_tags: bool,
    pub dynamic_content: bool,
    pub api_integration: bool,
    pub webhooks: bool,
    pub templates: bool,
    pub segmentation: bool,
}

/// Authentication requirements for a provider connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EspAuthentication {
    /// e.g. "api_key" or "oauth2"
    pub auth_type: String,
    /// Credential fields `connect` requires to be present and non-empty.
    pub required_fields: Vec<String>,
}

/// Volume and tag-count limits a provider enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EspLimits {
    pub max_recipients: Option<u64>,
    pub max_emails_per_hour: Option<u64>,
    pub max_merge_tags: Option<usize>,
}

/// Static per-provider record. `merge_tag_format` must contain the literal
/// substring `TOKEN`; the registry rejects descriptors that violate this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EspDescriptor {
    /// Registry key, lowercase.
    pub name: String,
    pub display_name: String,
    pub category: EspCategory,
    /// Template string with a literal `TOKEN` marker, e.g. `*|TOKEN|*`.
    pub merge_tag_format: String,
    /// `<img>` template with `IMAGE_URL` / `ALT_TEXT` / `IMAGE_STYLE`
    /// markers.
    pub image_tag_format: String,
    /// Provider-native field names; not necessarily catalog keys.
    pub supported_tokens: Vec<String>,
    pub api_endpoints: BTreeMap<String, String>,
    pub authentication: Option<EspAuthentication>,
    pub features: EspFeatures,
    pub limits: Option<EspLimits>,
    /// Native tag dialect; `Template` derives mechanically from
    /// `merge_tag_format`.
    pub dialect: MergeTagDialect,
}

impl EspDescriptor {
    /// Minimal well-formed descriptor; callers fill in the rest.
    pub fn new(name: &str, display_name: &str, category: EspCategory) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            category,
            merge_tag_format: "{{TOKEN}}".to_string(),
            image_tag_format: DEFAULT_IMAGE_TAG_FORMAT.to_string(),
            supported_tokens: Vec::new(),
            api_endpoints: BTreeMap::new(),
            authentication: None,
            features: EspFeatures::default(),
            limits: None,
            dialect: MergeTagDialect::Template,
        }
    }

    /// The provider's native merge tag for a field name.
    pub fn native_tag(&self, field: &str) -> String {
        self.dialect.wrap(field, &self.merge_tag_format)
    }

    /// True iff `field` appears in `supported_tokens`, compared
    /// case-insensitively with underscores ignored so catalog-style
    /// `FIRSTNAME` matches provider-style `first_name`.
    pub fn supports_field(&self, field: &str) -> bool {
        let wanted = normalize_field(field);
        self.supported_tokens
            .iter()
            .any(|t| normalize_field(t) == wanted)
    }
}

fn normalize_field(field: &str) -> String {
    field
        .chars()
        .filter(|c| *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_tag_uses_dialect() {
        let mut desc = EspDescriptor::new("acme", "Acme Mail", EspCategory::Marketing);
        desc.merge_tag_format = "~TOKEN~".to_string();
        assert_eq!(desc.native_tag("first_name"), "~first_name~");

        desc.dialect = MergeTagDialect::AsteriskPipe;
        assert_eq!(desc.native_tag("first_name"), "*|first_name|*");
    }

    #[test]
    fn test_supports_field_ignores_case_and_underscores() {
        let mut desc = EspDescriptor::new("acme", "Acme Mail", EspCategory::Marketing);
        desc.supported_tokens = vec!["first_name".to_string(), "email".to_string()];
        assert!(desc.supports_field("FIRSTNAME"));
        assert!(desc.supports_field("first_name"));
        assert!(desc.supports_field("EMAIL"));
        assert!(!desc.supports_field("DISCOUNT"));
    }

    #[test]
    fn test_descriptor_json_roundtrip() {
        let mut desc = EspDescriptor::new("acme", "Acme Mail", EspCategory::Marketing);
        desc.supported_tokens = vec!["first_name".to_string()];
        let json = serde_json::to_string(&desc).unwrap();
        let back: EspDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for cat in [
            EspCategory::Marketing,
            EspCategory::Transactional,
            EspCategory::Crm,
        ] {
            assert_eq!(cat.as_str().parse::<EspCategory>().unwrap(), cat);
        }
    }
}
