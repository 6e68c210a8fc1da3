//! Analysis session state machine.
//!
//! Tracks a single research request from submission to completion, and
//! gates result application so a stale flow (one the user abandoned or
//! superseded) can never overwrite newer state. Each accepted request is
//! tagged with a fresh token; only the holder of the current token may
//! publish its outcome.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use uuid::Uuid;

use crate::models::ResearchReport;
use crate::pipeline::ProgressUpdate;

/// Opaque tag identifying one accepted analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(Uuid);

/// Where a session currently stands.
#[derive(Debug, Clone)]
pub enum AnalysisState {
    /// No request accepted yet, or the last one was abandoned.
    Idle,
    /// A request is outstanding; concurrent submissions are refused.
    InFlight { query: String, request_id: Uuid },
    /// The last request produced a report.
    Done(Box<ResearchReport>),
    /// The last request failed; the message is user-facing.
    Failed(String),
}

impl AnalysisState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, AnalysisState::InFlight { .. })
    }
}

/// Shared, cloneable handle to one session's state.
///
/// Also carries the session's progress channel: cosmetic narrator
/// updates for the in-flight request are published here so a frontend
/// can render them without tracking the request itself.
#[derive(Clone)]
pub struct AnalysisSession {
    inner: Arc<Mutex<AnalysisState>>,
    progress: watch::Sender<ProgressUpdate>,
}

impl Default for AnalysisState {
    fn default() -> Self {
        AnalysisState::Idle
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        let (progress, _) = watch::channel(ProgressUpdate::default());
        Self {
            inner: Arc::default(),
            progress,
        }
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receiver for narrator updates; clone freely.
    pub fn progress(&self) -> watch::Receiver<ProgressUpdate> {
        self.progress.subscribe()
    }

    /// Publish a narrator update to any attached frontends.
    pub fn publish_progress(&self, update: ProgressUpdate) {
        let _ = self.progress.send(update);
    }

    /// Accept a new request, unless one is already outstanding.
    ///
    /// Returns the token the caller must present when publishing the
    /// outcome. `None` means another request is in flight and this one
    /// was refused.
    pub fn begin(&self, query: &str) -> Option<RequestToken> {
        let mut state = self.lock();
        if state.is_in_flight() {
            return None;
        }
        let request_id = Uuid::new_v4();
        *state = AnalysisState::InFlight {
            query: query.to_owned(),
            request_id,
        };
        Some(RequestToken(request_id))
    }

    /// Publish a finished report. Returns false if the token is stale,
    /// in which case the report is dropped and state is untouched.
    pub fn apply_report(&self, token: RequestToken, report: ResearchReport) -> bool {
        let mut state = self.lock();
        if !Self::token_is_current(&state, token) {
            tracing::debug!(request_id = %token.0, "discarding stale report");
            return false;
        }
        *state = AnalysisState::Done(Box::new(report));
        true
    }

    /// Publish a failure. Same staleness gating as `apply_report`.
    pub fn apply_failure(&self, token: RequestToken, message: impl Into<String>) -> bool {
        let mut state = self.lock();
        if !Self::token_is_current(&state, token) {
            tracing::debug!(request_id = %token.0, "discarding stale failure");
            return false;
        }
        *state = AnalysisState::Failed(message.into());
        true
    }

    /// Abandon the in-flight request, if any. Whatever result it later
    /// produces will be refused as stale.
    pub fn abandon(&self) {
        let mut state = self.lock();
        if state.is_in_flight() {
            *state = AnalysisState::Idle;
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AnalysisState {
        self.lock().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().is_in_flight()
    }

    fn token_is_current(state: &AnalysisState, token: RequestToken) -> bool {
        matches!(state, AnalysisState::InFlight { request_id, .. } if *request_id == token.0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AnalysisState> {
        // A poisoned session mutex only means a writer panicked between
        // plain assignments; the state itself is always coherent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
