//! Plain-text screens for the CLI.
//!
//! - `lost_found` - landing, report form, search, results and success screens
//! - `registration` - the patient registration kiosk routes
//!
//! Views only read snapshots; they never touch a session.

mod lost_found;
mod registration;

pub use lost_found::{LostFoundView, render_lost_found};
pub use registration::{RegistrationView, render_registration};

/// Marker for a busy control, e.g. a submit button while the request runs.
fn busy_label(busy: bool, idle: &str, working: &str) -> String {
    if busy {
        format!("[{working}]")
    } else {
        format!("[ {idle} ]")
    }
}
