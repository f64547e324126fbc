//! Step controllers for the two intake services.

pub mod lost_found;
pub mod registration;

pub use lost_found::{Event, Screen, transition};
pub use registration::{FlowError, RegistrationFlow, Route};
