//! CSV file catalog backend.

use std::path::PathBuf;

use async_trait::async_trait;
use intake_core::{CatalogConfig, CatalogError, CatalogFactory, CatalogSource, SearchRecord};
use tracing::{debug, info};

use crate::loader::{CatalogLoadError, CatalogLoader};

impl From<CatalogLoadError> for CatalogError {
    fn from(err: CatalogLoadError) -> Self {
        match err {
            CatalogLoadError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                CatalogError::NotFound(e.to_string())
            }
            other => CatalogError::Source(other.to_string()),
        }
    }
}

/// Catalog read from a CSV file each time it is asked for records.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for CsvCatalog {
    async fn records(&self) -> Result<Vec<SearchRecord>, CatalogError> {
        debug!(path = %self.path.display(), "reading catalog");
        let contents = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CatalogError::NotFound(self.path.display().to_string())
            } else {
                CatalogError::Source(format!("{}: {e}", self.path.display()))
            }
        })?;

        let records = CatalogLoader::parse(contents.as_slice())?;
        info!(count = records.len(), path = %self.path.display(), "catalog loaded");
        Ok(records)
    }
}

/// Factory for the `csv` backend; `location` is the file path.
pub struct CsvCatalogFactory;

#[async_trait]
impl CatalogFactory for CsvCatalogFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    async fn create(&self, config: &CatalogConfig) -> Result<Box<dyn CatalogSource>, CatalogError> {
        if config.location.trim().is_empty() {
            return Err(CatalogError::Configuration(
                "the csv catalog backend needs a file location".to_string(),
            ));
        }
        Ok(Box::new(CsvCatalog::new(config.location.trim())))
    }
}
