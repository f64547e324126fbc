//! Session objects owning the state of one kiosk or browser session.
//!
//! Nothing here outlives the session; dropping the last handle discards the
//! forms, the navigation state and any results.

pub mod lost_found;
pub mod registration;

pub use lost_found::{LostFoundOptions, LostFoundSession, LostFoundSnapshot};
pub use registration::{RegistrationOptions, RegistrationSession, RegistrationSnapshot};
