//! ESP descriptor registry and connection bookkeeping

use crate::descriptor::{EspCategory, EspDescriptor};
use crate::providers::builtin_descriptors;
use chrono::{DateTime, Utc};
use persona_core::EspError;
use persona_resolve::TokenResolver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A validated (but local-only) provider connection. No live handshake is
/// performed; this records that the caller supplied the required
/// credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EspConnection {
    pub esp_name: String,
    pub credentials: HashMap<String, String>,
    pub connected_at: DateTime<Utc>,
}

/// Live registry of ESP descriptors plus connection state. Both maps are
/// last-write-wins. Single-threaded by design; wrap in an `RwLock` if
/// shared across threads.
#[derive(Debug, Clone)]
pub struct EspRegistry {
    descriptors: HashMap<String, EspDescriptor>,
    connections: HashMap<String, EspConnection>,
    resolver: TokenResolver,
}

impl EspRegistry {
    /// Registry seeded with the built-in provider table and catalog.
    pub fn new() -> Self {
        Self::with_resolver(TokenResolver::default())
    }

    /// Registry with an injected resolver (and therefore catalog), for
    /// isolated test fixtures.
    pub fn with_resolver(resolver: TokenResolver) -> Self {
        let mut registry = Self {
            descriptors: HashMap::new(),
            connections: HashMap::new(),
            resolver,
        };
        // The built-in table upholds the TOKEN invariant (asserted in
        // providers.rs tests), so it skips register() validation.
        for descriptor in builtin_descriptors() {
            registry.descriptors.insert(descriptor.name.clone(), descriptor);
        }
        registry
    }

    pub fn resolver(&self) -> &TokenResolver {
        &self.resolver
    }

    /// Insert or overwrite a descriptor. Rejects descriptors whose
    /// `merge_tag_format` lacks the literal `TOKEN` marker.
    pub fn register(&mut self, descriptor: EspDescriptor) -> Result<(), EspError> {
        if !descriptor.merge_tag_format.contains("TOKEN") {
            return Err(EspError::InvalidDescriptor {
                name: descriptor.name.clone(),
                reason: "merge_tag_format must contain the literal marker TOKEN".to_string(),
            });
        }
        debug!(esp = %descriptor.name, "registered ESP descriptor");
        self.descriptors.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&EspDescriptor> {
        self.descriptors.get(name)
    }

    /// Internal lookup that maps absence to `EspError::NotFound`.
    pub(crate) fn descriptor(&self, name: &str) -> Result<&EspDescriptor, EspError> {
        self.descriptors.get(name).ok_or_else(|| EspError::NotFound {
            name: name.to_string(),
        })
    }

    /// All descriptors, optionally filtered by category, sorted by name
    /// for stable listings.
    pub fn list(&self, category: Option<EspCategory>) -> Vec<&EspDescriptor> {
        let mut descriptors: Vec<&EspDescriptor> = self
            .descriptors
            .values()
            .filter(|d| category.map_or(true, |c| d.category == c))
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Validate the descriptor's required credential fields and store a
    /// connection. Local bookkeeping only; overwrites any prior connection
    /// for the same provider.
    pub fn connect(
        &mut self,
        name: &str,
        credentials: HashMap<String, String>,
    ) -> Result<(), EspError> {
        let descriptor = self.descriptor(name)?;

        let missing: Vec<String> = descriptor
            .authentication
            .as_ref()
            .map(|auth| {
                auth.required_fields
                    .iter()
                    .filter(|f| credentials.get(*f).map_or(true, |v| v.is_empty()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if !missing.is_empty() {
            warn!(esp = name, fields = ?missing, "connect rejected, credentials missing");
            return Err(EspError::MissingCredentials {
                name: name.to_string(),
                fields: missing,
            });
        }

        self.connections.insert(
            name.to_string(),
            EspConnection {
                esp_name: name.to_string(),
                credentials,
                connected_at: Utc::now(),
            },
        );
        debug!(esp = name, "ESP connected");
        Ok(())
    }

    /// Drop a stored connection, returning it if one existed.
    pub fn disconnect(&mut self, name: &str) -> Option<EspConnection> {
        self.connections.remove(name)
    }

    pub fn connection(&self, name: &str) -> Option<&EspConnection> {
        self.connections.get(name)
    }
}

impl Default for EspRegistry {
    fn default() -> Self {
        Self::new()
    }
}
