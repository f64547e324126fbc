use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::source::{CatalogError, CatalogSource};

/// Backend-agnostic catalog configuration.
///
/// `backend` must match the [`CatalogFactory::backend_name`] of a
/// registered factory.  `location` is passed through to that factory
/// unchanged; its meaning is entirely backend-specific.
///
/// | backend    | location examples                   |
/// |------------|-------------------------------------|
/// | `builtin`  | ignored                             |
/// | `csv`      | `catalog.csv`, `data/found.csv`     |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"csv"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub location: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: "builtin".to_string(),
            location: String::new(),
        }
    }
}

/// One implementation per catalog backend, registered with a
/// [`CatalogRegistry`] at startup.
#[async_trait]
pub trait CatalogFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Open the catalog and return a ready-to-use source.
    async fn create(&self, config: &CatalogConfig) -> Result<Box<dyn CatalogSource>, CatalogError>;
}

/// Registry of [`CatalogFactory`] instances, keyed by backend name.
pub struct CatalogRegistry {
    factories: HashMap<&'static str, Box<dyn CatalogFactory>>,
}

impl CatalogRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// If a factory with the same [`CatalogFactory::backend_name`] is
    /// already present it is silently replaced.
    pub fn register(&mut self, factory: Box<dyn CatalogFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend` and return
    /// the source it produces.
    ///
    /// # Errors
    /// * [`CatalogError::Configuration`] if no factory is registered for
    ///   the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &CatalogConfig,
    ) -> Result<Box<dyn CatalogSource>, CatalogError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                CatalogError::Configuration(format!(
                    "unknown catalog backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for CatalogRegistry {
    fn default() -> Self {
        Self::new()
    }
}
