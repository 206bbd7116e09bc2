//! PERSONA Core - Token Types & Catalog
//!
//! Pure data types plus the static personalization token catalog.
//! All other crates depend on this. This crate contains no resolution
//! logic - only type definitions, the catalog, and the error taxonomy.

pub mod catalog;
pub mod enums;
pub mod error;

pub use catalog::{TokenCatalog, TokenDefinition, TokenValues};
pub use enums::{BracketSyntax, ContentType, TokenCategory};
pub use error::{EspError, PersonaError, PersonaResult, ResolveError};
