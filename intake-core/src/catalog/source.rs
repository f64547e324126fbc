use async_trait::async_trait;
use thiserror::Error;

use crate::models::SearchRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog not found: {0}")]
    NotFound(String),

    #[error("Catalog source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Read-only supply of found-item records.
///
/// The sessions never load records themselves; the application pulls the
/// catalog once from a source and injects it.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every record, in catalog order.
    async fn records(&self) -> Result<Vec<SearchRecord>, CatalogError>;

    async fn record(&self, id: u32) -> Result<SearchRecord, CatalogError> {
        self.records()
            .await?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("record {id}")))
    }
}
