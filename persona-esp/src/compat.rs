//! Template-vs-provider compatibility checking

use crate::registry::EspRegistry;
use persona_core::{ContentType, EspError};
use serde::{Deserialize, Serialize};

/// Limit assessment for one template against one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitCheck {
    /// True iff no issue strings were added.
    pub within_limits: bool,
    pub issues: Vec<String>,
}

/// Outcome of `check_compatibility`. Limit violations never affect
/// `is_compatible`; they are reported separately so the UI can warn
/// without blocking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// True iff there are zero unsupported tokens.
    pub is_compatible: bool,
    pub supported_tokens: Vec<String>,
    pub unsupported_tokens: Vec<String>,
    pub recommendations: Vec<String>,
    pub limits: LimitCheck,
}

impl EspRegistry {
    /// Compare the tokens found in `content` (email canonical syntax)
    /// against one provider's supported set and limits. A token is
    /// supported if it appears in the descriptor's `supported_tokens` or
    /// names an implemented catalog token.
    pub fn check_compatibility(
        &self,
        content: &str,
        esp_name: &str,
    ) -> Result<CompatibilityReport, EspError> {
        let descriptor = self.descriptor(esp_name)?;
        let validation = self.resolver().validate(content, ContentType::Email);

        let mut report = CompatibilityReport::default();
        for token in &validation.found_tokens {
            if descriptor.supports_field(token) || self.resolver().catalog().is_implemented(token)
            {
                report.supported_tokens.push(token.clone());
            } else {
                report.unsupported_tokens.push(token.clone());
            }
        }

        report.is_compatible = report.unsupported_tokens.is_empty();
        if !report.is_compatible {
            report.recommendations.push(format!(
                "{} supports these merge fields: {}",
                descriptor.display_name,
                descriptor.supported_tokens.join(", ")
            ));
        }

        if let Some(max) = descriptor.limits.and_then(|l| l.max_merge_tags) {
            if report.supported_tokens.len() > max {
                report.limits.issues.push(format!(
                    "Template uses {} merge tags; {} allows at most {}",
                    report.supported_tokens.len(),
                    descriptor.display_name,
                    max
                ));
            }
        }
        report.limits.within_limits = report.limits.issues.is_empty();

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EspCategory, EspDescriptor, EspLimits};

    #[test]
    fn test_unsupported_token_breaks_compatibility() {
        let registry = EspRegistry::new();
        let report = registry
            .check_compatibility(
                "Hi {{FIRSTNAME}}, your code is {{DISCOUNT}}",
                "mailchimp",
            )
            .unwrap();
        assert!(!report.is_compatible);
        assert_eq!(report.supported_tokens, vec!["FIRSTNAME"]);
        assert_eq!(report.unsupported_tokens, vec!["DISCOUNT"]);
        assert!(!report.recommendations.is_empty());
        // Tag-count limits are a separate concern.
        assert!(report.limits.within_limits);
    }

    #[test]
    fn test_implemented_catalog_token_is_supported_even_if_not_listed() {
        let registry = EspRegistry::new();
        // LOYALTY_TIER is not a provider field anywhere but is implemented
        // in the catalog.
        let report = registry
            .check_compatibility("Hi {FIRSTNAME}, tier {LOYALTY_TIER}", "mailchimp")
            .unwrap();
        assert!(report.is_compatible);
    }

    #[test]
    fn test_merge_tag_limit_reported_without_affecting_compatibility() {
        let mut registry = EspRegistry::new();
        let mut descriptor = EspDescriptor::new("tinyesp", "TinyESP", EspCategory::Marketing);
        descriptor.limits = Some(EspLimits {
            max_merge_tags: Some(1),
            ..Default::default()
        });
        registry.register(descriptor).unwrap();

        let report = registry
            .check_compatibility("{FIRSTNAME} {LASTNAME}", "tinyesp")
            .unwrap();
        assert!(report.is_compatible);
        assert!(!report.limits.within_limits);
        assert_eq!(report.limits.issues.len(), 1);
    }

    #[test]
    fn test_unknown_esp_is_not_found() {
        let registry = EspRegistry::new();
        let err = registry.check_compatibility("{FIRSTNAME}", "ghost").unwrap_err();
        assert_eq!(err, EspError::NotFound { name: "ghost".to_string() });
    }
}
