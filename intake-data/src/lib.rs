//! Catalog backends for the lost-and-found search.

pub mod builtin;
pub mod csv_source;
pub mod loader;

use intake_core::CatalogRegistry;

pub use builtin::{BuiltinCatalogFactory, StaticCatalog, demo_records};
pub use csv_source::{CsvCatalog, CsvCatalogFactory};
pub use loader::{CatalogLoadError, CatalogLoader};

/// Registry with every backend this crate provides.
pub fn default_registry() -> CatalogRegistry {
    let mut registry = CatalogRegistry::new();
    registry.register(Box::new(BuiltinCatalogFactory));
    registry.register(Box::new(CsvCatalogFactory));
    registry
}
