//! Route path of the patient registration kiosk.
//!
//! ```text
//! patient-form ──▶ document-scan ──▶ confirmation ──▶ registration-complete
//!      │                                                  ▲
//!      └──────────▶ unknown-patient ──────────────────────┘
//! ```
//!
//! Visited routes are kept as a stack so "back" behaves like browser history.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{PatientForm, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[default]
    PatientForm,
    DocumentScan,
    Confirmation,
    RegistrationComplete,
    UnknownPatient,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PatientForm => "patient-form",
            Self::DocumentScan => "document-scan",
            Self::Confirmation => "confirmation",
            Self::RegistrationComplete => "registration-complete",
            Self::UnknownPatient => "unknown-patient",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "patient-form" => Some(Self::PatientForm),
            "document-scan" => Some(Self::DocumentScan),
            "confirmation" => Some(Self::Confirmation),
            "registration-complete" => Some(Self::RegistrationComplete),
            "unknown-patient" => Some(Self::UnknownPatient),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("cannot {action} from {from}")]
    InvalidTransition { from: Route, action: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Route history for one registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationFlow {
    history: Vec<Route>,
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationFlow {
    pub fn new() -> Self {
        Self {
            history: vec![Route::PatientForm],
        }
    }

    pub fn current(&self) -> Route {
        self.history.last().copied().unwrap_or_default()
    }

    /// Routes visited so far, entry first.
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Moves one step along the happy path (or out of the unknown-patient
    /// branch).
    ///
    /// Leaving the patient form needs a name or manual entry. Nothing else
    /// is required; the identifier may still be unassigned on completion.
    pub fn next(&mut self, form: &PatientForm) -> Result<Route, FlowError> {
        let target = match self.current() {
            Route::PatientForm => {
                form.check_advance()?;
                Route::DocumentScan
            }
            Route::DocumentScan => Route::Confirmation,
            Route::Confirmation => Route::RegistrationComplete,
            Route::UnknownPatient => Route::RegistrationComplete,
            from @ Route::RegistrationComplete => {
                return Err(FlowError::InvalidTransition {
                    from,
                    action: "go to the next step",
                });
            }
        };

        Ok(self.push(target))
    }

    /// Branches off to the unknown-patient route. Only the patient form
    /// offers this.
    pub fn unknown_patient(&mut self) -> Result<Route, FlowError> {
        match self.current() {
            Route::PatientForm => Ok(self.push(Route::UnknownPatient)),
            from => Err(FlowError::InvalidTransition {
                from,
                action: "register an unknown patient",
            }),
        }
    }

    /// Pops one route. The entry route is never popped.
    pub fn back(&mut self) -> Route {
        if self.history.len() > 1 {
            self.history.pop();
        }
        let current = self.current();
        debug!(route = %current, "navigated back");
        current
    }

    /// Drops the history and returns to the entry route.
    pub fn restart(&mut self) -> Route {
        self.history.clear();
        self.history.push(Route::PatientForm);
        Route::PatientForm
    }

    fn push(&mut self, route: Route) -> Route {
        debug!(from = %self.current(), to = %route, "route pushed");
        self.history.push(route);
        route
    }
}
