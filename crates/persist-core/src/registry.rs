//! Provider registry - maps a configured backend key to a constructor
//!
//! Backend crates register themselves at process start; the host then
//! creates the provider named in its configuration.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ProviderError, ProviderResult};
use crate::traits::DatabaseProvider;

type ProviderConstructor = Box<dyn Fn() -> ProviderResult<Box<dyn DatabaseProvider>> + Send + Sync>;

/// Registry of provider constructors keyed by backend name
#[derive(Default)]
pub struct ProviderRegistry {
    constructors: BTreeMap<String, ProviderConstructor>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor, replacing any previous one for the key
    pub fn register<F>(&mut self, key: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn() -> ProviderResult<Box<dyn DatabaseProvider>> + Send + Sync + 'static,
    {
        let key = key.into();
        if self.constructors.insert(key.clone(), Box::new(constructor)).is_some() {
            tracing::warn!(key = %key, "Replacing registered database provider");
        }
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.constructors.contains_key(key)
    }

    /// Registered keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Construct the provider registered under `key`
    pub fn create(&self, key: &str) -> ProviderResult<Box<dyn DatabaseProvider>> {
        let constructor = self
            .constructors
            .get(key)
            .ok_or_else(|| ProviderError::UnknownProvider(key.to_string()))?;

        tracing::debug!(key = %key, "Creating database provider");
        constructor()
    }
}
