//! Static personalization token catalog
//!
//! Single source of truth for which tokens exist, their metadata, and
//! which are currently resolvable. The catalog is an immutable value
//! built once; tests may construct their own fixture catalogs instead
//! of the builtin table.

use crate::enums::TokenCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Per-call mapping of token key to recipient value.
pub type TokenValues = HashMap<String, String>;

// ============================================================================
// TOKEN DEFINITION
// ============================================================================

/// Static metadata for one personalization token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDefinition {
    /// Uppercase identifier, unique across the catalog.
    pub key: String,
    pub display_name: String,
    pub description: String,
    pub category: TokenCategory,
    pub default_value: Option<String>,
    /// Gate: only implemented tokens are "valid" to the validator and
    /// participate in default-value generation.
    pub is_implemented: bool,
}

fn def(
    key: &str,
    display_name: &str,
    description: &str,
    category: TokenCategory,
    default_value: Option<&str>,
    is_implemented: bool,
) -> TokenDefinition {
    TokenDefinition {
        key: key.to_string(),
        display_name: display_name.to_string(),
        description: description.to_string(),
        category,
        default_value: default_value.map(|s| s.to_string()),
        is_implemented,
    }
}

// ============================================================================
// TOKEN CATALOG
// ============================================================================

/// Immutable registry of token definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCatalog {
    definitions: Vec<TokenDefinition>,
}

impl TokenCatalog {
    /// Build a catalog from an explicit definition list. Later duplicates
    /// of a key are dropped; the first declaration wins.
    pub fn new(definitions: Vec<TokenDefinition>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let definitions = definitions
            .into_iter()
            .filter(|d| seen.insert(d.key.clone()))
            .collect();
        Self { definitions }
    }

    /// The builtin token table.
    pub fn builtin() -> Self {
        use TokenCategory::*;
        Self::new(vec![
            // Basic
            def("FIRSTNAME", "First Name", "Recipient's first name", Basic, Some("there"), true),
            def("LASTNAME", "Last Name", "Recipient's last name", Basic, None, true),
            def("FULLNAME", "Full Name", "Recipient's full name", Basic, None, true),
            def("EMAIL", "Email Address", "Recipient's email address", Basic, None, true),
            // Location
            def("CITY", "City", "Recipient's city", Location, None, true),
            def("STATE", "State / Region", "Recipient's state or region", Location, None, true),
            def("COUNTRY", "Country", "Recipient's country", Location, None, true),
            def("TIMEZONE", "Time Zone", "Recipient's IANA time zone", Location, None, false),
            // Company
            def("COMPANY", "Company", "Recipient's company name", Company, Some("your company"), true),
            def("JOBTITLE", "Job Title", "Recipient's job title", Company, None, true),
            def("INDUSTRY", "Industry", "Recipient's industry vertical", Company, None, true),
            def("DEPARTMENT", "Department", "Recipient's department", Company, None, false),
            // Social
            def("LINKEDIN_URL", "LinkedIn URL", "Recipient's LinkedIn profile URL", Social, None, true),
            def("TWITTER_HANDLE", "Twitter Handle", "Recipient's Twitter/X handle", Social, None, false),
            // Dates
            def("BIRTHDAY", "Birthday", "Recipient's birthday", Dates, None, true),
            def("SIGNUP_DATE", "Signup Date", "Date the recipient signed up", Dates, None, true),
            def("LAST_PURCHASE_DATE", "Last Purchase Date", "Date of the recipient's most recent purchase", Dates, None, false),
            // Engagement
            def("LAST_OPEN", "Last Open", "When the recipient last opened a campaign", Engagement, None, true),
            def("LOYALTY_TIER", "Loyalty Tier", "Recipient's loyalty program tier", Engagement, Some("member"), true),
            def("ENGAGEMENT_SCORE", "Engagement Score", "Computed engagement score", Engagement, None, false),
            // Campaign
            def("CAMPAIGN_NAME", "Campaign Name", "Name of the sending campaign", Campaign, None, true),
            def("OFFER_EXPIRY", "Offer Expiry", "Expiration date of the current offer", Campaign, None, true),
            def("UTM_SOURCE", "UTM Source", "Tracking source for campaign links", Campaign, Some("email"), true),
            // Communication
            def("PHONE", "Phone Number", "Recipient's phone number", Communication, None, true),
            def("PREFERRED_CHANNEL", "Preferred Channel", "Recipient's preferred contact channel", Communication, Some("email"), true),
            def("UNSUBSCRIBE_URL", "Unsubscribe URL", "Per-recipient unsubscribe link", Communication, None, true),
            // Dynamic
            def("PRODUCT_RECOMMENDATION", "Product Recommendation", "Dynamically selected product suggestion", Dynamic, None, false),
            def("WEATHER", "Local Weather", "Recipient's local weather at send time", Dynamic, None, false),
            def("DYNAMIC_CONTENT", "Dynamic Content Block", "Slot for externally supplied dynamic content", Dynamic, None, true),
        ])
    }

    /// All definitions, optionally filtered to one category.
    pub fn tokens(&self, category: Option<TokenCategory>) -> Vec<&TokenDefinition> {
        self.definitions
            .iter()
            .filter(|d| category.map_or(true, |c| d.category == c))
            .collect()
    }

    /// Every fixed category key (even if empty) mapped to its definitions
    /// in catalog declaration order. UI panels rely on all nine keys being
    /// present so they can render stable sections without null checks.
    pub fn by_category(&self) -> BTreeMap<TokenCategory, Vec<&TokenDefinition>> {
        let mut grouped: BTreeMap<TokenCategory, Vec<&TokenDefinition>> = TokenCategory::ALL
            .iter()
            .map(|c| (*c, Vec::new()))
            .collect();
        for d in &self.definitions {
            grouped.entry(d.category).or_default().push(d);
        }
        grouped
    }

    /// Default values for a starter session: every implemented token with
    /// a non-empty default, overlaid with a fixed starter persona. The
    /// overlay always wins so a fresh UI session shows coherent example
    /// data without a network call.
    pub fn default_values(&self) -> TokenValues {
        let mut values: TokenValues = self
            .definitions
            .iter()
            .filter(|d| d.is_implemented)
            .filter_map(|d| {
                d.default_value
                    .as_ref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (d.key.clone(), v.clone()))
            })
            .collect();
        for (key, value) in [
            ("FIRSTNAME", "Sarah"),
            ("LASTNAME", "Chen"),
            ("COMPANY", "Acme Corp"),
            ("EMAIL", "sarah.chen@example.com"),
        ] {
            values.insert(key.to_string(), value.to_string());
        }
        values
    }

    /// Wrap a bare key in the canonical display bracket: `[KEY]`.
    /// Pure formatting; does not check the key exists.
    pub fn display_token(key: &str) -> String {
        format!("[{}]", key)
    }

    /// Look up a definition by key.
    pub fn get(&self, key: &str) -> Option<&TokenDefinition> {
        self.definitions.iter().find(|d| d.key == key)
    }

    /// True iff the key names an implemented catalog token.
    pub fn is_implemented(&self, key: &str) -> bool {
        self.get(key).map_or(false, |d| d.is_implemented)
    }

    /// Iterate all definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TokenDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for TokenCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keys_unique() {
        let catalog = TokenCatalog::builtin();
        let mut seen = std::collections::HashSet::new();
        for d in catalog.iter() {
            assert!(seen.insert(d.key.clone()), "duplicate key {}", d.key);
        }
    }

    #[test]
    fn test_by_category_always_has_all_nine_keys() {
        let catalog = TokenCatalog::new(vec![]);
        let grouped = catalog.by_category();
        assert_eq!(grouped.len(), 9);
        for cat in TokenCategory::ALL {
            assert!(grouped.get(&cat).is_some_and(|v| v.is_empty()));
        }
    }

    #[test]
    fn test_by_category_preserves_declaration_order() {
        let catalog = TokenCatalog::builtin();
        let grouped = catalog.by_category();
        let basic: Vec<&str> = grouped[&TokenCategory::Basic]
            .iter()
            .map(|d| d.key.as_str())
            .collect();
        assert_eq!(basic, vec!["FIRSTNAME", "LASTNAME", "FULLNAME", "EMAIL"]);
    }

    #[test]
    fn test_default_values_overlay_wins() {
        let catalog = TokenCatalog::builtin();
        let values = catalog.default_values();
        // FIRSTNAME has its own default ("there") but the starter persona
        // overlay takes precedence.
        assert_eq!(values.get("FIRSTNAME").map(String::as_str), Some("Sarah"));
        // LASTNAME has no catalog default; the overlay still supplies it.
        assert_eq!(values.get("LASTNAME").map(String::as_str), Some("Chen"));
        // Implemented token with a default comes through.
        assert_eq!(values.get("UTM_SOURCE").map(String::as_str), Some("email"));
    }

    #[test]
    fn test_default_values_skip_unimplemented() {
        let catalog = TokenCatalog::new(vec![TokenDefinition {
            key: "WEATHER".to_string(),
            display_name: "Weather".to_string(),
            description: String::new(),
            category: TokenCategory::Dynamic,
            default_value: Some("sunny".to_string()),
            is_implemented: false,
        }]);
        assert!(!catalog.default_values().contains_key("WEATHER"));
    }

    #[test]
    fn test_display_token_wraps_without_validation() {
        assert_eq!(TokenCatalog::display_token("NOT_A_TOKEN"), "[NOT_A_TOKEN]");
    }

    #[test]
    fn test_tokens_filtered_by_category() {
        let catalog = TokenCatalog::builtin();
        for d in catalog.tokens(Some(TokenCategory::Location)) {
            assert_eq!(d.category, TokenCategory::Location);
        }
        assert_eq!(catalog.tokens(None).len(), catalog.len());
    }

    #[test]
    fn test_definition_serializes_for_ui_consumption() {
        let catalog = TokenCatalog::builtin();
        let json = serde_json::to_value(catalog.get("FIRSTNAME").unwrap()).unwrap();
        assert_eq!(json["key"], "FIRSTNAME");
        assert_eq!(json["category"], "basic");
        assert_eq!(json["is_implemented"], true);
    }

    #[test]
    fn test_is_implemented_gate() {
        let catalog = TokenCatalog::builtin();
        assert!(catalog.is_implemented("FIRSTNAME"));
        assert!(!catalog.is_implemented("WEATHER"));
        assert!(!catalog.is_implemented("DISCOUNT"));
    }
}
