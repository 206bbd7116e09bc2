//! Enum types shared across the PERSONA engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// TOKEN CATEGORIES
// ============================================================================

/// Category grouping for personalization tokens.
/// UI panels render one section per category, so the set is closed and
/// every category is always reported even when empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Basic,
    Location,
    Company,
    Social,
    Dates,
    Engagement,
    Campaign,
    Communication,
    Dynamic,
}

impl TokenCategory {
    /// All categories in declaration order.
    pub const ALL: [TokenCategory; 9] = [
        TokenCategory::Basic,
        TokenCategory::Location,
        TokenCategory::Company,
        TokenCategory::Social,
        TokenCategory::Dates,
        TokenCategory::Engagement,
        TokenCategory::Campaign,
        TokenCategory::Communication,
        TokenCategory::Dynamic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Basic => "basic",
            TokenCategory::Location => "location",
            TokenCategory::Company => "company",
            TokenCategory::Social => "social",
            TokenCategory::Dates => "dates",
            TokenCategory::Engagement => "engagement",
            TokenCategory::Campaign => "campaign",
            TokenCategory::Communication => "communication",
            TokenCategory::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TokenCategory {
    type Err = TokenCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(TokenCategory::Basic),
            "location" => Ok(TokenCategory::Location),
            "company" => Ok(TokenCategory::Company),
            "social" => Ok(TokenCategory::Social),
            "dates" => Ok(TokenCategory::Dates),
            "engagement" => Ok(TokenCategory::Engagement),
            "campaign" => Ok(TokenCategory::Campaign),
            "communication" => Ok(TokenCategory::Communication),
            "dynamic" => Ok(TokenCategory::Dynamic),
            other => Err(TokenCategoryParseError(other.to_string())),
        }
    }
}

/// Error when parsing an invalid token category string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCategoryParseError(pub String);

impl fmt::Display for TokenCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid token category: {}", self.0)
    }
}

impl std::error::Error for TokenCategoryParseError {}

// ============================================================================
// BRACKET SYNTAXES
// ============================================================================

/// The four literal wrapping conventions a token may appear under.
/// These are byte-for-byte part of the contract with stored templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSyntax {
    /// `[TOKEN]`
    Square,
    /// `{TOKEN}`
    Curly,
    /// `__TOKEN__`
    DoubleUnderscore,
    /// `%TOKEN%`
    Percent,
}

impl BracketSyntax {
    /// All syntaxes in scan order. Resolution always scans all four,
    /// regardless of content type.
    pub const ALL: [BracketSyntax; 4] = [
        BracketSyntax::Square,
        BracketSyntax::Curly,
        BracketSyntax::DoubleUnderscore,
        BracketSyntax::Percent,
    ];

    /// Literal opening affix.
    pub fn open(&self) -> &'static str {
        match self {
            BracketSyntax::Square => "[",
            BracketSyntax::Curly => "{",
            BracketSyntax::DoubleUnderscore => "__",
            BracketSyntax::Percent => "%",
        }
    }

    /// Literal closing affix.
    pub fn close(&self) -> &'static str {
        match self {
            BracketSyntax::Square => "]",
            BracketSyntax::Curly => "}",
            BracketSyntax::DoubleUnderscore => "__",
            BracketSyntax::Percent => "%",
        }
    }

    /// Wrap a bare token key in this syntax's literal affixes.
    pub fn wrap(&self, key: &str) -> String {
        format!("{}{}{}", self.open(), key, self.close())
    }
}

impl fmt::Display for BracketSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wrap("TOKEN"))
    }
}

// ============================================================================
// CONTENT TYPES
// ============================================================================

/// Logical channel for a piece of content. Selects the canonical bracket
/// syntax used when generating NEW placeholder text; it never restricts
/// which syntaxes are scanned during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Prompt,
    Email,
    Sms,
    Marketing,
    Social,
}

impl ContentType {
    /// The canonical bracket syntax for placeholders newly generated for
    /// this channel.
    pub fn canonical_syntax(&self) -> BracketSyntax {
        match self {
            ContentType::Prompt => BracketSyntax::Square,
            ContentType::Email => BracketSyntax::Curly,
            ContentType::Sms => BracketSyntax::Percent,
            ContentType::Marketing => BracketSyntax::Square,
            ContentType::Social => BracketSyntax::DoubleUnderscore,
        }
    }

    /// Placeholder literal emitted for a missing token under lenient
    /// resolution.
    pub fn placeholder(&self, key: &str) -> String {
        self.canonical_syntax().wrap(key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Prompt => "prompt",
            ContentType::Email => "email",
            ContentType::Sms => "sms",
            ContentType::Marketing => "marketing",
            ContentType::Social => "social",
        }
    }
}

impl Default for ContentType {
    fn default() -> Self {
        ContentType::Prompt
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ContentTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prompt" => Ok(ContentType::Prompt),
            "email" => Ok(ContentType::Email),
            "sms" => Ok(ContentType::Sms),
            "marketing" => Ok(ContentType::Marketing),
            "social" => Ok(ContentType::Social),
            other => Err(ContentTypeParseError(other.to_string())),
        }
    }
}

/// Error when parsing an invalid content type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeParseError(pub String);

impl fmt::Display for ContentTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid content type: {}", self.0)
    }
}

impl std::error::Error for ContentTypeParseError {}
