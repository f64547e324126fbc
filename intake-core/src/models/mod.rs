mod lost_item;
mod patient;
mod search_record;
mod station;
mod validation;

pub use lost_item::{
    LostItemField, LostItemForm, LostItemReport, MAX_PHOTO_BYTES, MAX_PHOTOS, PhotoHandle,
    PhotoLimits, filter_photos,
};
pub use patient::{DocumentHandle, DocumentKind, Gender, PatientField, PatientForm, Uip};
pub use search_record::SearchRecord;
pub use station::Station;
pub use validation::{UploadRejected, ValidationError};
