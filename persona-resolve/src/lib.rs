//! PERSONA Resolve - Token Resolution Engine
//!
//! Locates personalization tokens across the four supported bracket
//! syntaxes and substitutes them according to a value/fallback precedence.
//! All four syntaxes are always scanned on input; the content type only
//! selects which syntax is used for newly generated placeholder text.

pub mod options;
pub mod resolver;
pub mod syntax;
pub mod validate;

pub use options::{BatchItem, ResolveOptions, ResolveOverrides};
pub use resolver::{ResolutionResult, TokenResolver};
pub use syntax::{convert_format, find_tokens, TokenMatch};
pub use validate::{TokenUsageReport, TokenValidation};
