//! PERSONA ESP - Provider Compatibility Layer
//!
//! Adapts resolved or placeholder-bearing content into the native
//! merge-tag dialect of a chosen email service provider, and assesses
//! whether a template is safe to send through that provider.

pub mod compat;
pub mod descriptor;
pub mod generate;
pub mod guide;
pub mod merge_tags;
pub mod providers;
pub mod registry;

pub use compat::{CompatibilityReport, LimitCheck};
pub use descriptor::{
    EspAuthentication, EspCategory, EspDescriptor, EspFeatures, EspLimits,
};
pub use generate::{GenerateOptions, GeneratedContent};
pub use merge_tags::{default_token_mapping, MergeTagDialect};
pub use providers::builtin_descriptors;
pub use registry::{EspConnection, EspRegistry};
