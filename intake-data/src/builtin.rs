//! In-memory catalog backend.

use async_trait::async_trait;
use chrono::NaiveDate;
use intake_core::{
    CatalogConfig, CatalogError, CatalogFactory, CatalogSource, SearchRecord, Station,
};

/// The two sample records the service ships with.
pub fn demo_records() -> Vec<SearchRecord> {
    vec![
        SearchRecord {
            id: 1,
            photo_ref: "https://placehold.co/400x300".to_string(),
            description: "Черный кошелек с документами, найден на станции Пушкинская".to_string(),
            location: Station::Pushkinskaya,
            date: NaiveDate::from_ymd_opt(2023, 9, 15).unwrap_or_default(),
        },
        SearchRecord {
            id: 2,
            photo_ref: "https://placehold.co/400x300".to_string(),
            description: "Синий зонт, найден на платформе Курская".to_string(),
            location: Station::Kurskaya,
            date: NaiveDate::from_ymd_opt(2023, 9, 18).unwrap_or_default(),
        },
    ]
}

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: Vec<SearchRecord>,
}

impl StaticCatalog {
    pub fn new(records: Vec<SearchRecord>) -> Self {
        Self { records }
    }

    pub fn demo() -> Self {
        Self::new(demo_records())
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn records(&self) -> Result<Vec<SearchRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}

/// Factory for the `builtin` backend. The configured location is ignored.
pub struct BuiltinCatalogFactory;

#[async_trait]
impl CatalogFactory for BuiltinCatalogFactory {
    fn backend_name(&self) -> &'static str {
        "builtin"
    }

    async fn create(
        &self,
        _config: &CatalogConfig,
    ) -> Result<Box<dyn CatalogSource>, CatalogError> {
        Ok(Box::new(StaticCatalog::demo()))
    }
}
