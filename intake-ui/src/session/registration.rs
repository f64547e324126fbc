//! Session state of the patient registration kiosk.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use intake_core::action::LOOKUP_DELAY;
use intake_core::{
    ActionError, ActionSimulator, DocumentKind, FlowError, IdentifierAssigner, Latency,
    PatientField, PatientForm, RegistrationFlow, Route, TimerLatency, Uip, ValidationError,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Clone)]
pub struct RegistrationOptions {
    pub lookup_delay: Duration,
    pub latency: Arc<dyn Latency>,
    /// Seed for the identifier lookup; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            lookup_delay: LOOKUP_DELAY,
            latency: Arc::new(TimerLatency),
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationSnapshot {
    pub route: Route,
    pub history: Vec<Route>,
    pub form: PatientForm,
    pub can_advance: bool,
    pub is_looking_up: bool,
    /// Patients registered during this session, oldest first.
    pub registered: Vec<PatientForm>,
}

#[derive(Debug, Default)]
struct RegistrationState {
    flow: RegistrationFlow,
    form: PatientForm,
    registered: Vec<PatientForm>,
    /// Index in `registered` of the current patient, once recorded.
    recorded: Option<usize>,
}

impl RegistrationState {
    /// One step forward. Leaving the unknown-patient route always hands out
    /// the pending identifier.
    fn advance(&mut self) -> Result<Route, FlowError> {
        if self.flow.current() == Route::UnknownPatient {
            self.form = self.form.with_uip(Uip::Pending);
        }
        let form = self.form.clone();
        let route = self.flow.next(&form)?;
        self.record_if_complete();
        Ok(route)
    }

    /// Reaching completion again (after going back) updates the existing
    /// entry instead of adding a second one.
    fn record_if_complete(&mut self) {
        if self.flow.current() != Route::RegistrationComplete {
            return;
        }
        match self.recorded {
            Some(index) => {
                debug!(uip = %self.form.uip, "registration updated");
                self.registered[index] = self.form.clone();
            }
            None => {
                info!(uip = %self.form.uip, unknown = self.form.is_unknown, "patient registered");
                self.recorded = Some(self.registered.len());
                self.registered.push(self.form.clone());
            }
        }
    }
}

#[derive(Clone)]
pub struct RegistrationSession {
    state: Arc<Mutex<RegistrationState>>,
    assigner: Arc<Mutex<IdentifierAssigner>>,
    lookup: ActionSimulator,
}

impl RegistrationSession {
    pub fn new(options: RegistrationOptions) -> Self {
        let assigner = match options.rng_seed {
            Some(seed) => IdentifierAssigner::seeded(seed),
            None => IdentifierAssigner::from_entropy(),
        };

        Self {
            state: Arc::new(Mutex::new(RegistrationState::default())),
            assigner: Arc::new(Mutex::new(assigner)),
            lookup: ActionSimulator::new(
                "identifier lookup",
                options.lookup_delay,
                options.latency,
            ),
        }
    }

    pub fn snapshot(&self) -> RegistrationSnapshot {
        let state = self.lock();
        RegistrationSnapshot {
            route: state.flow.current(),
            history: state.flow.history().to_vec(),
            form: state.form.clone(),
            can_advance: state.form.can_advance(),
            is_looking_up: self.lookup.is_busy(),
            registered: state.registered.clone(),
        }
    }

    pub fn route(&self) -> Route {
        self.lock().flow.current()
    }

    pub fn is_looking_up(&self) -> bool {
        self.lookup.is_busy()
    }

    pub fn set_field(&self, field: PatientField) {
        let mut state = self.lock();
        state.form = state.form.set_field(field);
    }

    pub fn set_field_by_name(&self, name: &str, value: &str) -> Result<(), ValidationError> {
        let field = PatientField::parse(name, value)?;
        self.set_field(field);
        Ok(())
    }

    /// "Next" on the current screen.
    pub fn next(&self) -> Result<Route, FlowError> {
        self.lock().advance()
    }

    /// Simulated scan of `kind`; only the document-scan screen has a scanner.
    pub fn scan_document(&self, kind: DocumentKind) -> Result<(), FlowError> {
        let mut state = self.lock();
        let from = state.flow.current();
        if from != Route::DocumentScan {
            return Err(FlowError::InvalidTransition {
                from,
                action: "scan a document",
            });
        }
        state.form = state.form.with_scan(kind);
        debug!(document = kind.as_str(), "document scanned");
        Ok(())
    }

    /// Branches to the unknown-patient screen.
    pub fn register_unknown(&self) -> Result<Route, FlowError> {
        let mut state = self.lock();
        let route = state.flow.unknown_patient()?;
        state.form = state.form.as_unknown();
        Ok(route)
    }

    /// Finishes an unknown-patient registration. Such patients always get
    /// a new identifier.
    pub fn complete_unknown(&self) -> Result<Route, FlowError> {
        let mut state = self.lock();
        let from = state.flow.current();
        if from != Route::UnknownPatient {
            return Err(FlowError::InvalidTransition {
                from,
                action: "complete an unknown-patient registration",
            });
        }
        state.advance()
    }

    /// Confirms the collected data: looks the patient up in the (simulated)
    /// registry, then completes the registration.
    ///
    /// If the kiosk left the confirmation screen while the lookup was in
    /// flight, the identifier is still stored but no route change happens.
    pub async fn confirm(&self) -> Result<Uip, ActionError> {
        {
            let state = self.lock();
            let from = state.flow.current();
            if from != Route::Confirmation {
                return Err(FlowError::InvalidTransition {
                    from,
                    action: "confirm registration",
                }
                .into());
            }
        }

        let state = self.state.clone();
        let assigner = self.assigner.clone();
        self.lookup
            .run(move || -> Result<Uip, ActionError> {
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                if !state.form.uip.is_assigned() {
                    let uip = assigner
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .assign();
                    state.form = state.form.with_uip(uip);
                }

                if state.flow.current() == Route::Confirmation {
                    state.advance()?;
                } else {
                    debug!(
                        route = %state.flow.current(),
                        "lookup finished after leaving confirmation"
                    );
                }
                Ok(state.form.uip.clone())
            })
            .await?
    }

    pub fn back(&self) -> Route {
        let mut state = self.lock();
        let left = state.flow.current();
        let route = state.flow.back();
        if left == Route::UnknownPatient {
            state.form = state.form.as_known();
        }
        route
    }

    /// "New patient": clears the form and returns to the entry screen.
    pub fn new_patient(&self) -> Route {
        let mut state = self.lock();
        state.form = PatientForm::default();
        state.recorded = None;
        state.flow.restart()
    }

    fn lock(&self) -> MutexGuard<'_, RegistrationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use intake_core::NoLatency;
    use pretty_assertions::assert_eq;

    use super::*;

    fn instant_session(seed: u64) -> RegistrationSession {
        RegistrationSession::new(RegistrationOptions {
            latency: Arc::new(NoLatency),
            rng_seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn next_is_gated_on_name_or_manual_entry() {
        let session = instant_session(1);

        assert_eq!(
            session.next(),
            Err(FlowError::Validation(ValidationError::NameOrManualEntryRequired))
        );
        assert!(!session.snapshot().can_advance);

        session.set_field(PatientField::ManualEntry(true));
        assert_eq!(session.next(), Ok(Route::DocumentScan));
    }

    #[test]
    fn scanning_is_only_possible_on_the_scan_screen() {
        let session = instant_session(1);

        assert!(matches!(
            session.scan_document(DocumentKind::Passport),
            Err(FlowError::InvalidTransition {
                from: Route::PatientForm,
                ..
            })
        ));

        session.set_field_by_name("fio", "Иванов Иван").unwrap();
        session.next().unwrap();
        session.scan_document(DocumentKind::Passport).unwrap();
        session.scan_document(DocumentKind::Oms).unwrap();

        let form = session.snapshot().form;
        assert!(form.passport_scan.is_some());
        assert!(form.oms_scan.is_some());
        assert!(form.snils_scan.is_none());
    }

    #[tokio::test]
    async fn confirm_assigns_identifier_and_completes() {
        let session = instant_session(9);
        session.set_field_by_name("fio", "Иванов Иван").unwrap();
        session.next().unwrap();
        session.next().unwrap();

        let uip = session.confirm().await.unwrap();

        assert!(uip.is_assigned());
        let snapshot = session.snapshot();
        assert_eq!(snapshot.route, Route::RegistrationComplete);
        assert_eq!(snapshot.form.uip, uip);
        assert_eq!(snapshot.registered.len(), 1);
    }

    #[tokio::test]
    async fn confirm_elsewhere_is_refused() {
        let session = instant_session(9);

        assert!(matches!(
            session.confirm().await,
            Err(ActionError::Flow(FlowError::InvalidTransition {
                from: Route::PatientForm,
                ..
            }))
        ));
    }

    #[test]
    fn unknown_patient_branch_gets_pending_identifier() {
        let session = instant_session(1);

        assert_eq!(session.register_unknown(), Ok(Route::UnknownPatient));
        assert_eq!(session.complete_unknown(), Ok(Route::RegistrationComplete));

        let snapshot = session.snapshot();
        assert!(snapshot.form.is_unknown);
        assert_eq!(snapshot.form.uip, Uip::Pending);
        assert_eq!(
            snapshot.history,
            vec![Route::PatientForm, Route::UnknownPatient, Route::RegistrationComplete]
        );
    }

    #[test]
    fn new_patient_resets_everything_but_the_register() {
        let session = instant_session(1);
        session.register_unknown().unwrap();
        session.complete_unknown().unwrap();

        assert_eq!(session.new_patient(), Route::PatientForm);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.form, PatientForm::default());
        assert_eq!(snapshot.history, vec![Route::PatientForm]);
        assert_eq!(snapshot.registered.len(), 1);
    }

    #[test]
    fn back_from_unknown_branch_restores_the_next_gate() {
        let session = instant_session(1);
        session.register_unknown().unwrap();

        assert_eq!(session.back(), Route::PatientForm);

        let snapshot = session.snapshot();
        assert!(!snapshot.form.is_unknown);
        assert!(!snapshot.can_advance);
        assert_eq!(
            session.next(),
            Err(FlowError::Validation(ValidationError::NameOrManualEntryRequired))
        );
    }

    #[test]
    fn next_on_unknown_branch_assigns_pending_identifier() {
        let session = instant_session(1);
        session.register_unknown().unwrap();

        assert_eq!(session.next(), Ok(Route::RegistrationComplete));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.form.uip, Uip::Pending);
        assert_eq!(snapshot.registered[0].uip, Uip::Pending);
    }

    #[test]
    fn next_from_confirmation_completes_without_lookup() {
        let session = instant_session(1);
        session.set_field(PatientField::ManualEntry(true));
        session.next().unwrap();
        session.next().unwrap();

        assert_eq!(session.next(), Ok(Route::RegistrationComplete));
        assert_eq!(session.snapshot().registered[0].uip, Uip::Unassigned);
    }

    #[tokio::test]
    async fn confirming_again_after_back_keeps_one_entry() {
        let session = instant_session(9);
        session.set_field_by_name("fio", "Иванов Иван").unwrap();
        session.next().unwrap();
        session.next().unwrap();
        let first = session.confirm().await.unwrap();

        assert_eq!(session.back(), Route::Confirmation);
        session.set_field_by_name("phone", "+7 900 000-00-00").unwrap();
        let second = session.confirm().await.unwrap();

        assert_eq!(first, second);
        let registered = session.snapshot().registered;
        assert_eq!(registered.len(), 1);
        assert_eq!(registered[0].phone, "+7 900 000-00-00");

        session.new_patient();
        session.register_unknown().unwrap();
        session.complete_unknown().unwrap();
        assert_eq!(session.snapshot().registered.len(), 2);
    }

    #[test]
    fn back_follows_history() {
        let session = instant_session(1);
        session.set_field(PatientField::Fio("Петров".to_string()));
        session.next().unwrap();
        session.next().unwrap();

        assert_eq!(session.back(), Route::DocumentScan);
        assert_eq!(session.back(), Route::PatientForm);
    }
}
