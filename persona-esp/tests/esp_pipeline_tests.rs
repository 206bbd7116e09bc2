//! End-to-end ESP pipeline tests
//!
//! Drives the registry the way a send panel would: register/connect a
//! provider, generate per-recipient content, and pre-flight a template.

use persona_core::EspError;
use persona_esp::{
    EspCategory, EspDescriptor, EspLimits, EspRegistry, GenerateOptions, MergeTagDialect,
};
use std::collections::HashMap;

const NEWSLETTER_TEMPLATE: &str =
    "Hi [FIRSTNAME], [COMPANY] has an offer for [CITY]: [PERSONALIZED_IMAGE]";

fn recipient(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn full_pipeline_for_a_builtin_provider() {
    let mut registry = EspRegistry::new();

    registry
        .connect(
            "mailchimp",
            recipient(&[("api_key", "abc123"), ("server_prefix", "us21")]),
        )
        .unwrap();
    assert!(registry.connection("mailchimp").is_some());

    let result = registry
        .generate_personalized_content(
            NEWSLETTER_TEMPLATE,
            &recipient(&[("FIRSTNAME", "John"), ("CITY", "Lisbon")]),
            "mailchimp",
            Some("https://img.example.com/offer.png"),
            &GenerateOptions::default(),
        )
        .unwrap();

    // Provided fields substituted, the missing COMPANY became a native tag.
    assert!(result.email_content.starts_with("Hi John, *|company|* has an offer for Lisbon"));
    let image_url = result.personalized_image_url.unwrap();
    assert!(image_url.contains("city=Lisbon"));
    assert!(image_url.contains("firstname=John"));
    assert!(result.email_content.contains("<img src=\""));
}

#[test]
fn custom_descriptor_registration_and_translation() {
    let mut registry = EspRegistry::new();
    let mut descriptor = EspDescriptor::new("acmemail", "AcmeMail", EspCategory::Transactional);
    descriptor.merge_tag_format = "<<TOKEN>>".to_string();
    descriptor.dialect = MergeTagDialect::Template;
    descriptor.supported_tokens = vec!["first_name".to_string()];
    descriptor.limits = Some(EspLimits {
        max_merge_tags: Some(5),
        ..Default::default()
    });
    registry.register(descriptor).unwrap();

    let translated = registry
        .translate_to_merge_tags("Hello [FIRSTNAME]", "acmemail", None)
        .unwrap();
    assert_eq!(translated, "Hello <<first_name>>");

    let report = registry
        .check_compatibility("Hello {FIRSTNAME}", "acmemail")
        .unwrap();
    assert!(report.is_compatible);
    assert!(report.limits.within_limits);
}

#[test]
fn compatibility_preflight_blocks_nothing_but_reports_everything() {
    let registry = EspRegistry::new();
    let report = registry
        .check_compatibility(
            "Hi {FIRSTNAME}, your code {DISCOUNT} expires {OFFER_EXPIRY}",
            "mailchimp",
        )
        .unwrap();

    assert!(!report.is_compatible);
    assert_eq!(report.unsupported_tokens, vec!["DISCOUNT"]);
    // OFFER_EXPIRY is an implemented catalog token even though Mailchimp
    // doesn't list it natively.
    assert!(report.supported_tokens.contains(&"OFFER_EXPIRY".to_string()));
    assert_eq!(report.recommendations.len(), 1);
}

#[test]
fn every_builtin_provider_renders_a_guide_and_translates() {
    let registry = EspRegistry::new();
    for descriptor in registry.list(None) {
        let name = descriptor.name.clone();
        let guide = registry.setup_guide(&name).unwrap();
        assert!(guide.contains("## Merge Tag Format"), "{}", name);

        let translated = registry
            .translate_to_merge_tags("[FIRSTNAME]", &name, None)
            .unwrap();
        assert!(
            !translated.contains("[FIRSTNAME]"),
            "{} left the canonical token untranslated",
            name
        );
        assert!(translated.contains("first_name"), "{}", name);
    }
}

#[test]
fn esp_not_found_is_uniform_across_operations() {
    let registry = EspRegistry::new();
    let not_found = EspError::NotFound {
        name: "ghost".to_string(),
    };
    assert_eq!(
        registry.translate_to_merge_tags("x", "ghost", None).unwrap_err(),
        not_found
    );
    assert_eq!(registry.check_compatibility("x", "ghost").unwrap_err(), not_found);
    assert_eq!(registry.setup_guide("ghost").unwrap_err(), not_found);
}
