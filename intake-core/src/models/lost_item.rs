use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::station::Station;
use super::validation::{UploadRejected, ValidationError};

/// Largest photo accepted by the upload filter (5 MB).
pub const MAX_PHOTO_BYTES: u64 = 5 * 1024 * 1024;

/// Number of photos a report may carry.
pub const MAX_PHOTOS: usize = 3;

/// Upload limits applied to report photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoLimits {
    pub max_bytes: u64,
    pub max_count: usize,
}

impl Default for PhotoLimits {
    fn default() -> Self {
        Self {
            max_bytes: MAX_PHOTO_BYTES,
            max_count: MAX_PHOTOS,
        }
    }
}

/// A file handed over by the file-input collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoHandle {
    pub name: String,
    pub size: u64,
}

impl PhotoHandle {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Splits `files` into the ones within `max_bytes` and rejections for the
/// rest. Input order is preserved on both sides.
pub fn filter_photos<I>(files: I, max_bytes: u64) -> (Vec<PhotoHandle>, Vec<UploadRejected>)
where
    I: IntoIterator<Item = PhotoHandle>,
{
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for file in files {
        if file.size <= max_bytes {
            accepted.push(file);
        } else {
            rejected.push(UploadRejected {
                name: file.name,
                size: file.size,
                limit: max_bytes,
            });
        }
    }

    (accepted, rejected)
}

/// A single field update coming from the report form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LostItemField {
    Description(String),
    Date(Option<NaiveDate>),
    Location(Option<Station>),
    AcceptedRules(bool),
}

impl LostItemField {
    /// Builds a field update from the input's `name` attribute and raw value.
    ///
    /// Empty date and location values clear the field, the same as picking
    /// the placeholder option.
    pub fn parse(name: &str, value: &str) -> Result<Self, ValidationError> {
        match name {
            "description" => Ok(Self::Description(value.to_string())),
            "date" => {
                if value.trim().is_empty() {
                    return Ok(Self::Date(None));
                }
                NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                    .map(|date| Self::Date(Some(date)))
                    .map_err(|_| ValidationError::InvalidValue {
                        field: "date",
                        value: value.to_string(),
                    })
            }
            "location" => {
                if value.trim().is_empty() {
                    return Ok(Self::Location(None));
                }
                Station::parse(value)
                    .map(|station| Self::Location(Some(station)))
                    .ok_or_else(|| ValidationError::InvalidValue {
                        field: "location",
                        value: value.to_string(),
                    })
            }
            "accepted_rules" => match value.trim() {
                "true" | "on" | "1" => Ok(Self::AcceptedRules(true)),
                "false" | "off" | "0" | "" => Ok(Self::AcceptedRules(false)),
                _ => Err(ValidationError::InvalidValue {
                    field: "accepted_rules",
                    value: value.to_string(),
                }),
            },
            other => Err(ValidationError::UnknownField(other.to_string())),
        }
    }
}

/// In-progress lost item report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LostItemForm {
    pub description: String,
    pub date: Option<NaiveDate>,
    pub location: Option<Station>,
    pub photos: Vec<PhotoHandle>,
    pub accepted_rules: bool,
}

impl LostItemForm {
    /// Returns a copy of the form with one field replaced.
    pub fn set_field(&self, field: LostItemField) -> Self {
        match field {
            LostItemField::Description(description) => Self {
                description,
                ..self.clone()
            },
            LostItemField::Date(date) => Self {
                date,
                ..self.clone()
            },
            LostItemField::Location(location) => Self {
                location,
                ..self.clone()
            },
            LostItemField::AcceptedRules(accepted_rules) => Self {
                accepted_rules,
                ..self.clone()
            },
        }
    }

    /// Returns a copy of the form with the acceptable `files` appended.
    ///
    /// Files over `max_bytes` are left out and reported back. The photo count
    /// limit is checked on submit, not here.
    pub fn add_photos<I>(&self, files: I, max_bytes: u64) -> (Self, Vec<UploadRejected>)
    where
        I: IntoIterator<Item = PhotoHandle>,
    {
        let (accepted, rejected) = filter_photos(files, max_bytes);
        let mut photos = self.photos.clone();
        photos.extend(accepted);

        (
            Self {
                photos,
                ..self.clone()
            },
            rejected,
        )
    }

    /// Returns `true` when the submit control should be enabled.
    pub fn can_submit(&self, limits: &PhotoLimits) -> bool {
        self.validate_for_submit(limits).is_ok()
    }

    /// Validates that the form has every value a report needs.
    ///
    /// Rules:
    /// - description, date and location are required
    /// - no more than `limits.max_count` photos
    pub fn validate_for_submit(
        &self,
        limits: &PhotoLimits,
    ) -> Result<LostItemReport, Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.description.trim().is_empty() {
            errors.push(ValidationError::Required("description"));
        }
        if self.date.is_none() {
            errors.push(ValidationError::Required("date"));
        }
        if self.location.is_none() {
            errors.push(ValidationError::Required("location"));
        }
        if self.photos.len() > limits.max_count {
            errors.push(ValidationError::TooManyPhotos {
                count: self.photos.len(),
                limit: limits.max_count,
            });
        }

        match (self.date, self.location) {
            (Some(date), Some(location)) if errors.is_empty() => Ok(LostItemReport {
                description: self.description.trim().to_string(),
                date,
                location,
                photos: self.photos.clone(),
                accepted_rules: self.accepted_rules,
            }),
            _ => Err(errors),
        }
    }
}

/// A report that passed validation and was handed to submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LostItemReport {
    pub description: String,
    pub date: NaiveDate,
    pub location: Station,
    pub photos: Vec<PhotoHandle>,
    pub accepted_rules: bool,
}

impl fmt::Display for LostItemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Date:        {}", self.date)?;
        writeln!(f, "Station:     {}", self.location)?;
        writeln!(f, "Photos:      {}", self.photos.len())
    }
}
