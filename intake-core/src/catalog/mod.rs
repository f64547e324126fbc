pub mod factory;
pub mod source;

pub use factory::{CatalogConfig, CatalogFactory, CatalogRegistry};
pub use source::{CatalogError, CatalogSource};
