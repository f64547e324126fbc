//! Session state of the lost-and-found service.
//!
//! A session owns the report form, the search query and results, and the
//! current screen. It is a cheap handle: clones share the same state, so one
//! handle can navigate while another waits on a simulated request.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use intake_core::action::{SEARCH_DELAY, SUBMIT_DELAY};
use intake_core::matching::search_owned;
use intake_core::{
    ActionError, ActionSimulator, Event, Latency, LostItemField, LostItemForm, LostItemReport,
    PhotoHandle, PhotoLimits, Screen, SearchRecord, TimerLatency, UploadRejected,
    ValidationError,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Construction options for a [`LostFoundSession`].
#[derive(Clone)]
pub struct LostFoundOptions {
    pub entry_screen: Screen,
    pub limits: PhotoLimits,
    pub submit_delay: Duration,
    pub search_delay: Duration,
    pub latency: Arc<dyn Latency>,
}

impl Default for LostFoundOptions {
    fn default() -> Self {
        Self {
            entry_screen: Screen::Landing,
            limits: PhotoLimits::default(),
            submit_delay: SUBMIT_DELAY,
            search_delay: SEARCH_DELAY,
            latency: Arc::new(TimerLatency),
        }
    }
}

/// Everything the renderer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LostFoundSnapshot {
    pub screen: Screen,
    pub form: LostItemForm,
    pub search_query: String,
    pub search_results: Vec<SearchRecord>,
    pub is_submitting: bool,
    pub is_searching: bool,
    /// Uploads refused since the form was last reset.
    pub rejected_uploads: Vec<UploadRejected>,
    /// Reports accepted during this session, oldest first.
    pub submitted: Vec<LostItemReport>,
}

#[derive(Debug, Default)]
struct LostFoundState {
    screen: Screen,
    form: LostItemForm,
    search_query: String,
    search_results: Vec<SearchRecord>,
    rejected_uploads: Vec<UploadRejected>,
    submitted: Vec<LostItemReport>,
}

#[derive(Clone)]
pub struct LostFoundSession {
    state: Arc<Mutex<LostFoundState>>,
    catalog: Arc<[SearchRecord]>,
    limits: PhotoLimits,
    submit: ActionSimulator,
    search: ActionSimulator,
}

impl LostFoundSession {
    pub fn new(catalog: Vec<SearchRecord>, options: LostFoundOptions) -> Self {
        let state = LostFoundState {
            screen: options.entry_screen,
            ..Default::default()
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            catalog: catalog.into(),
            limits: options.limits,
            submit: ActionSimulator::new("submit", options.submit_delay, options.latency.clone()),
            search: ActionSimulator::new("search", options.search_delay, options.latency),
        }
    }

    pub fn snapshot(&self) -> LostFoundSnapshot {
        let state = self.lock();
        LostFoundSnapshot {
            screen: state.screen,
            form: state.form.clone(),
            search_query: state.search_query.clone(),
            search_results: state.search_results.clone(),
            is_submitting: self.submit.is_busy(),
            is_searching: self.search.is_busy(),
            rejected_uploads: state.rejected_uploads.clone(),
            submitted: state.submitted.clone(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.lock().screen
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_busy()
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_busy()
    }

    pub fn limits(&self) -> PhotoLimits {
        self.limits
    }

    /// Applies a navigation event and returns the new screen.
    pub fn navigate(&self, event: Event) -> Screen {
        let mut state = self.lock();
        let from = state.screen;
        state.screen = from.apply(event);
        debug!(%from, to = %state.screen, ?event, "screen changed");
        state.screen
    }

    /// Starts a flow the way the landing screen does, wherever the session
    /// currently is: returns to landing first, then applies `event`.
    pub fn start(&self, event: Event) -> Screen {
        if self.screen() != Screen::Landing {
            self.navigate(Event::Back);
        }
        self.navigate(event)
    }

    pub fn set_field(&self, field: LostItemField) {
        let mut state = self.lock();
        state.form = state.form.set_field(field);
    }

    /// Field update from a named form input.
    pub fn set_field_by_name(&self, name: &str, value: &str) -> Result<(), ValidationError> {
        let field = LostItemField::parse(name, value)?;
        self.set_field(field);
        Ok(())
    }

    /// Attaches the acceptable files and returns the refused ones.
    ///
    /// Refusals are also kept in the snapshot so the form can show them.
    pub fn add_photos(&self, files: Vec<PhotoHandle>) -> Vec<UploadRejected> {
        let mut state = self.lock();
        let (form, rejected) = state.form.add_photos(files, self.limits.max_bytes);
        for refused in &rejected {
            warn!(name = %refused.name, size = refused.size, "photo over the size limit dropped");
        }
        state.form = form;
        state.rejected_uploads.extend(rejected.iter().cloned());
        rejected
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.lock().search_query = query.into();
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submit.is_busy() && self.lock().form.can_submit(&self.limits)
    }

    /// Submits the report form.
    ///
    /// On completion the session shows the success screen and the form is
    /// reset for the next report.
    ///
    /// # Errors
    /// * [`ActionError::Validation`] – a required field is missing.
    /// * [`ActionError::Busy`] – a submission is already in flight.
    pub async fn submit_report(&self) -> Result<LostItemReport, ActionError> {
        let report = self
            .lock()
            .form
            .validate_for_submit(&self.limits)
            .map_err(ActionError::Validation)?;

        info!(station = %report.location, photos = report.photos.len(), "submitting report");

        let state = self.state.clone();
        let accepted = report.clone();
        self.submit
            .run(move || {
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                state.screen = state.screen.apply(Event::SubmitCompleted);
                state.form = LostItemForm::default();
                state.rejected_uploads.clear();
                state.submitted.push(accepted);
            })
            .await?;

        Ok(report)
    }

    /// Searches the catalog for the current query.
    ///
    /// The query is taken when the search starts; results replace the
    /// previous ones and the session shows the results screen.
    pub async fn perform_search(&self) -> Result<Vec<SearchRecord>, ActionError> {
        let query = self.lock().search_query.clone();
        let state = self.state.clone();
        let catalog = self.catalog.clone();

        let results = self
            .search
            .run(move || {
                let results = search_owned(&query, &catalog);
                info!(%query, hits = results.len(), "search finished");
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                state.search_results = results.clone();
                if state.screen != Screen::SearchResults {
                    state.screen = state.screen.apply(Event::SearchCompleted);
                }
                results
            })
            .await?;

        Ok(results)
    }

    fn lock(&self) -> MutexGuard<'_, LostFoundState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
