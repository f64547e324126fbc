//! Free-text lookup over the found-items catalog.
//!
//! A record matches when its description or its station name contains the
//! query, ignoring case. There is no ranking: matches come back in catalog
//! order.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use intake_core::matching::search;
//! use intake_core::{SearchRecord, Station};
//!
//! let catalog = vec![SearchRecord {
//!     id: 1,
//!     photo_ref: "https://placehold.co/400x300".to_string(),
//!     description: "Синий зонт, найден на платформе Курская".to_string(),
//!     location: Station::Kurskaya,
//!     date: NaiveDate::from_ymd_opt(2023, 9, 18).unwrap(),
//! }];
//!
//! assert_eq!(search("ЗОНТ", &catalog).len(), 1);
//! assert!(search("кошелек", &catalog).is_empty());
//! ```

use crate::models::SearchRecord;

/// Returns the records matching `query`. An empty query matches everything.
pub fn search<'a>(query: &str, catalog: &'a [SearchRecord]) -> Vec<&'a SearchRecord> {
    let needle = query.to_lowercase();

    catalog
        .iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

/// Same as [`search`] but returns owned records.
pub fn search_owned(query: &str, catalog: &[SearchRecord]) -> Vec<SearchRecord> {
    search(query, catalog).into_iter().cloned().collect()
}

fn matches(record: &SearchRecord, needle: &str) -> bool {
    record.description.to_lowercase().contains(needle)
        || record.location.as_str().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Station;

    fn catalog() -> Vec<SearchRecord> {
        vec![
            SearchRecord {
                id: 1,
                photo_ref: "https://placehold.co/400x300".to_string(),
                description: "Черный кошелек с документами, найден на станции Пушкинская"
                    .to_string(),
                location: Station::Pushkinskaya,
                date: NaiveDate::from_ymd_opt(2023, 9, 15).unwrap(),
            },
            SearchRecord {
                id: 2,
                photo_ref: "https://placehold.co/400x300".to_string(),
                description: "Синий зонт, найден на платформе Курская".to_string(),
                location: Station::Kurskaya,
                date: NaiveDate::from_ymd_opt(2023, 9, 18).unwrap(),
            },
        ]
    }

    fn ids(records: &[&SearchRecord]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn description_substring_matches_first_record() {
        let catalog = catalog();

        assert_eq!(ids(&search("кошелек", &catalog)), vec![1]);
    }

    #[test]
    fn station_name_matches_second_record() {
        let catalog = catalog();

        assert_eq!(ids(&search("Курская", &catalog)), vec![2]);
    }

    #[test]
    fn unmatched_query_returns_nothing() {
        let catalog = catalog();

        assert!(search("zzz", &catalog).is_empty());
    }

    #[test]
    fn empty_query_returns_every_record() {
        let catalog = catalog();

        assert_eq!(ids(&search("", &catalog)), vec![1, 2]);
    }

    #[test]
    fn matching_ignores_case_for_cyrillic() {
        let catalog = catalog();

        assert_eq!(ids(&search("ЧЕРНЫЙ КОШЕЛЕК", &catalog)), vec![1]);
        assert_eq!(ids(&search("пушкинская", &catalog)), vec![1]);
    }

    #[test]
    fn location_field_matches_even_when_description_does_not() {
        let mut catalog = catalog();
        catalog[1].description = "Синий зонт".to_string();

        assert_eq!(ids(&search("курская", &catalog)), vec![2]);
    }

    #[test]
    fn search_owned_clones_matches() {
        let catalog = catalog();

        assert_eq!(search_owned("зонт", &catalog), vec![catalog[1].clone()]);
    }
}
