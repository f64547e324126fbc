use serde::Serialize;
use thiserror::Error;

/// A form field failed to validate.
///
/// Validation failures block forward navigation; the rendering layer shows
/// them next to the disabled control.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error("at most {limit} photos may be attached, got {count}")]
    TooManyPhotos { count: usize, limit: usize },

    #[error("enter the patient's full name or switch to manual entry")]
    NameOrManualEntryRequired,
}

/// A selected file was refused by the photo upload filter.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("'{name}' is {size} bytes, the limit is {limit} bytes")]
pub struct UploadRejected {
    pub name: String,
    pub size: u64,
    pub limit: u64,
}
