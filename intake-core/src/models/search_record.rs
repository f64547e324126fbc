use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::station::Station;

/// A found item held at a station's lost property desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: u32,
    pub photo_ref: String,
    pub description: String,
    pub location: Station,
    pub date: NaiveDate,
}
