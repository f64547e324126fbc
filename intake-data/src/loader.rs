//! CSV loader for the found-items catalog.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column        | Required | Type    | Notes                                   |
//! |---------------|----------|---------|-----------------------------------------|
//! | `id`          | yes      | integer | unique within the file                  |
//! | `photo_ref`   | no       | string  | URL of the item photo, may be empty     |
//! | `description` | yes      | string  |                                         |
//! | `location`    | yes      | string  | station name, e.g. `Пушкинская`         |
//! | `date`        | yes      | date    | `YYYY-MM-DD`                            |
//!
//! ```csv
//! id,photo_ref,description,location,date
//! 1,https://placehold.co/400x300,"Черный кошелек с документами",Пушкинская,2023-09-15
//! ```

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use intake_core::{SearchRecord, Station};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based (header = row 0).
    #[error("unrecognised station '{station}' on row {row}")]
    InvalidStation { station: String, row: usize },

    #[error("duplicate record id {id} on row {row}")]
    DuplicateId { id: u32, row: usize },

    #[error("cannot read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serde-compatible row that mirrors the CSV layout exactly.
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: u32,
    #[serde(default)]
    photo_ref: String,
    description: String,
    location: String,
    date: NaiveDate,
}

/// Loader for found-item records.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse catalog records from a CSV reader. Rows are returned in file
    /// order.
    ///
    /// # Errors
    ///
    /// * [`CatalogLoadError::Parse`] – structurally invalid CSV, a missing
    ///   required column or a bad id/date.
    /// * [`CatalogLoadError::InvalidStation`] – unknown station name.
    /// * [`CatalogLoadError::DuplicateId`] – an id seen on an earlier row.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SearchRecord>, CatalogLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for (idx, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
            let row = result?;
            let row_number = idx + 1;

            if !seen.insert(row.id) {
                return Err(CatalogLoadError::DuplicateId {
                    id: row.id,
                    row: row_number,
                });
            }

            records.push(convert_row(row, row_number)?);
        }

        Ok(records)
    }

    /// Read a file from disk and delegate to [`CatalogLoader::parse`].
    pub fn load_file(path: &Path) -> Result<Vec<SearchRecord>, CatalogLoadError> {
        let file = std::fs::File::open(path)?;
        Self::parse(file)
    }
}

fn convert_row(row: CsvRow, row_number: usize) -> Result<SearchRecord, CatalogLoadError> {
    let location =
        Station::parse(&row.location).ok_or_else(|| CatalogLoadError::InvalidStation {
            station: row.location.clone(),
            row: row_number,
        })?;

    Ok(SearchRecord {
        id: row.id,
        photo_ref: row.photo_ref,
        description: row.description,
        location,
        date: row.date,
    })
}
