//! Error types for PERSONA operations

use thiserror::Error;

/// Token resolution errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Required token missing: {key}")]
    MissingRequiredToken { key: String },
}

/// ESP compatibility layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EspError {
    #[error("ESP not found: {name}")]
    NotFound { name: String },

    #[error("Missing credentials for {name}: {fields:?}")]
    MissingCredentials { name: String, fields: Vec<String> },

    #[error("Invalid descriptor for {name}: {reason}")]
    InvalidDescriptor { name: String, reason: String },
}

/// Top-level error wrapper for PERSONA operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersonaError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Esp(#[from] EspError),
}

/// Result type alias for PERSONA operations.
pub type PersonaResult<T> = Result<T, PersonaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_token_display() {
        let err = ResolveError::MissingRequiredToken {
            key: "FIRSTNAME".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Required token missing"));
        assert!(msg.contains("FIRSTNAME"));
    }

    #[test]
    fn test_esp_not_found_display() {
        let err = EspError::NotFound {
            name: "mailchimp".to_string(),
        };
        assert!(format!("{}", err).contains("mailchimp"));
    }

    #[test]
    fn test_missing_credentials_display_lists_fields() {
        let err = EspError::MissingCredentials {
            name: "sendgrid".to_string(),
            fields: vec!["api_key".to_string()],
        };
        let msg = format!("{}", err);
        assert!(msg.contains("sendgrid"));
        assert!(msg.contains("api_key"));
    }

    #[test]
    fn test_persona_error_from_variants() {
        let resolve = PersonaError::from(ResolveError::MissingRequiredToken {
            key: "EMAIL".to_string(),
        });
        assert!(matches!(resolve, PersonaError::Resolve(_)));

        let esp = PersonaError::from(EspError::NotFound {
            name: "klaviyo".to_string(),
        });
        assert!(matches!(esp, PersonaError::Esp(_)));
    }
}
