//! Simulated backend round trips.
//!
//! Submitting a report, searching the catalog and looking up a patient
//! identifier all stand in for network calls. [`ActionSimulator`] wraps such
//! an action: it raises a busy flag, waits a fixed delay, lowers the flag and
//! then applies the completion. The wait comes from an injected [`Latency`]
//! so tests can use a paused clock or skip it entirely.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::flow::FlowError;
use crate::models::ValidationError;

/// Default delay of a report submission.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);
/// Default delay of a catalog search.
pub const SEARCH_DELAY: Duration = Duration::from_millis(1000);
/// Default delay of an identifier lookup.
pub const LOOKUP_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// The action is already running; its control is disabled.
    #[error("{0} is already in progress")]
    Busy(&'static str),

    #[error("form is incomplete ({} problem(s))", .0.len())]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Flow(#[from] FlowError),

    /// Reserved for a real submission backend. The simulator never fails.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// Reserved for a real identity registry. The simulator never fails.
    #[error("identifier lookup failed: {0}")]
    IdentifierLookupFailed(String),
}

impl From<ValidationError> for ActionError {
    fn from(err: ValidationError) -> Self {
        ActionError::Validation(vec![err])
    }
}

/// Source of the artificial wait.
#[async_trait]
pub trait Latency: Send + Sync {
    async fn wait(&self, delay: Duration);
}

/// Waits on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerLatency;

#[async_trait]
impl Latency for TimerLatency {
    async fn wait(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn wait(&self, _delay: Duration) {
    }
}

/// Shared "request in flight" flag.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raises the flag unless it is already up.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard(self.0.clone()))
    }
}

/// Lowers the busy flag when dropped.
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One simulated action with its own busy flag.
#[derive(Clone)]
pub struct ActionSimulator {
    name: &'static str,
    delay: Duration,
    latency: Arc<dyn Latency>,
    busy: BusyFlag,
}

impl ActionSimulator {
    pub fn new(name: &'static str, delay: Duration, latency: Arc<dyn Latency>) -> Self {
        Self {
            name,
            delay,
            latency,
            busy: BusyFlag::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Runs the action: busy for the whole delay, then `complete` is applied
    /// after the flag is lowered.
    ///
    /// # Errors
    /// [`ActionError::Busy`] when the action is already in flight.
    pub async fn run<T, F>(&self, complete: F) -> Result<T, ActionError>
    where
        F: FnOnce() -> T,
    {
        let guard = self
            .busy
            .try_acquire()
            .ok_or(ActionError::Busy(self.name))?;

        info!(
            action = self.name,
            delay_ms = self.delay.as_millis() as u64,
            "simulated request started"
        );
        self.latency.wait(self.delay).await;
        drop(guard);
        debug!(action = self.name, "simulated request finished");

        Ok(complete())
    }
}

impl fmt::Debug for ActionSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSimulator")
            .field("name", &self.name)
            .field("delay", &self.delay)
            .field("busy", &self.is_busy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use pretty_assertions::assert_eq;
    use tokio::time::{Instant, advance};

    use super::*;

    fn timed(delay_ms: u64) -> ActionSimulator {
        ActionSimulator::new("submit", Duration::from_millis(delay_ms), Arc::new(TimerLatency))
    }

    #[test]
    fn busy_flag_is_exclusive_until_guard_drops() {
        let flag = BusyFlag::default();

        let guard = flag.try_acquire().expect("flag starts lowered");
        assert!(flag.is_busy());
        assert!(flag.try_acquire().is_none());

        drop(guard);
        assert!(!flag.is_busy());
        assert!(flag.try_acquire().is_some());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn busy_exactly_for_the_delay() {
        let action = timed(1500);
        assert!(!action.is_busy());

        let started = Instant::now();
        let task = tokio::spawn({
            let action = action.clone();
            async move { action.run(Instant::now).await }
        });

        tokio::task::yield_now().await;
        assert!(action.is_busy());

        advance(Duration::from_millis(1499)).await;
        assert!(action.is_busy());

        let finished_at = task.await.unwrap().unwrap();
        assert!(!action.is_busy());
        let elapsed = finished_at - started;
        assert!(elapsed >= Duration::from_millis(1500), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1510), "{elapsed:?}");
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn second_run_while_busy_is_refused() {
        let action = timed(1000);
        let calls = Arc::new(AtomicUsize::new(0));

        let first = tokio::spawn({
            let action = action.clone();
            let calls = calls.clone();
            async move {
                action
                    .run(move || calls.fetch_add(1, Ordering::SeqCst))
                    .await
            }
        });
        tokio::task::yield_now().await;

        let second = action.run(|| calls.fetch_add(1, Ordering::SeqCst)).await;
        assert_eq!(second, Err(ActionError::Busy("submit")));

        first.await.unwrap().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // free again once the first run completed
        assert!(action.run(|| ()).await.is_ok());
    }

    #[tokio::test]
    async fn completion_sees_flag_lowered() {
        let action = ActionSimulator::new("search", SEARCH_DELAY, Arc::new(NoLatency));
        let probe = action.clone();

        let was_busy = action.run(|| probe.is_busy()).await.unwrap();

        assert!(!was_busy);
    }

    #[test]
    fn validation_error_converts_into_action_error() {
        let err: ActionError = ValidationError::Required("date").into();

        assert_eq!(err, ActionError::Validation(vec![ValidationError::Required("date")]));
    }
}
