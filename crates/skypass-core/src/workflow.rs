use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::ActionError;
use crate::presenter::{Presenter, Refresher};
use crate::types::{
    ActionRequest, ActionResult, Dismissal, FailureKind, Indicator, Outcome, Phase, Settled,
};

/// How long a timed success indicator stays up before the refresh.
pub const DEFAULT_SUCCESS_DISPLAY: Duration = Duration::from_secs(2);

const ERROR_TITLE: &str = "Error";

// ─── ActionWorkflow ───────────────────────────────────────────────────────

/// Drives confirm → call → report around one asynchronous operation.
///
/// A workflow is shared by every action of a dashboard. It holds no state
/// between runs other than the set of targets with a run in progress.
pub struct ActionWorkflow {
    presenter: Arc<dyn Presenter>,
    refresher: Arc<dyn Refresher>,
    success_display: Duration,
    in_flight: Mutex<HashSet<String>>,
}

impl ActionWorkflow {
    pub fn new(presenter: Arc<dyn Presenter>, refresher: Arc<dyn Refresher>) -> Self {
        Self {
            presenter,
            refresher,
            success_display: DEFAULT_SUCCESS_DISPLAY,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_success_display(mut self, duration: Duration) -> Self {
        self.success_display = duration;
        self
    }

    /// Run one action to completion.
    ///
    /// `operation` is invoked at most once, and only after the operator
    /// confirmed (when the request asks for it). Failures of the operation
    /// never escape: they are shown through the presenter and reported as
    /// [`Settled::Failed`]. The refresher runs on success only.
    pub async fn run<F, Fut>(&self, request: ActionRequest, operation: F) -> Settled
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<ActionResult, ActionError>>,
    {
        let key = request.target.key();

        let Some(_claim) = InFlight::claim(&self.in_flight, &key) else {
            warn!(target_key = %key, "action already in progress; ignoring trigger");
            return Settled::Busy;
        };

        if let Some(prompt) = &request.confirmation {
            debug!(target_key = %key, phase = %Phase::ConfirmationRequested);
            if !self.presenter.confirm(prompt).await {
                debug!(target_key = %key, phase = %Phase::ConfirmationDeclined);
                return Settled::Declined;
            }
        }

        debug!(target_key = %key, phase = %Phase::Pending);
        self.presenter.show_pending(&request.pending).await;

        let result = operation().await;
        self.presenter.dismiss().await;

        let settled = match resolve(result, &request.failure_message) {
            Ok(done) => {
                debug!(target_key = %key, phase = %Phase::Success);
                let indicator = Indicator::new(&request.success_title, &done.message);
                self.presenter
                    .show_success(&indicator, request.success_dismissal)
                    .await;
                self.await_success_dismissal(request.success_dismissal)
                    .await;
                self.presenter.dismiss().await;
                self.refresher.refresh().await;
                info!(target_key = %key, result = %done.message, "action succeeded");
                Settled::Succeeded {
                    message: done.message,
                    payload: done.payload,
                }
            }
            Err((kind, message)) => {
                debug!(target_key = %key, phase = %Phase::Failure);
                warn!(target_key = %key, ?kind, reason = %message, "action failed");
                let indicator = Indicator::new(ERROR_TITLE, &message);
                self.presenter.show_error(&indicator).await;
                self.presenter.wait_dismissed().await;
                Settled::Failed { kind, message }
            }
        };

        debug!(target_key = %key, phase = %Phase::Idle);
        settled
    }

    async fn await_success_dismissal(&self, dismissal: Dismissal) {
        match dismissal {
            Dismissal::Timed => {
                tokio::select! {
                    _ = tokio::time::sleep(self.success_display) => {}
                    _ = self.presenter.wait_dismissed() => {}
                }
            }
            Dismissal::Manual => self.presenter.wait_dismissed().await,
        }
    }
}

// ─── Internal ─────────────────────────────────────────────────────────────

/// Pick the message to show for a finished operation.
///
/// Server-supplied text wins; `fallback` covers transport errors and
/// failures that carry no usable message.
fn resolve(
    result: std::result::Result<ActionResult, ActionError>,
    fallback: &str,
) -> std::result::Result<ActionResult, (FailureKind, String)> {
    let or_fallback = |message: Option<String>| {
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    };

    match result {
        Ok(done) if done.outcome == Outcome::Success => Ok(done),
        Ok(done) => Err((FailureKind::Application, or_fallback(Some(done.message)))),
        Err(ActionError::Application { message }) => {
            Err((FailureKind::Application, or_fallback(message)))
        }
        Err(ActionError::Transport(detail)) => {
            debug!(%detail, "transport failure detail");
            Err((FailureKind::Transport, fallback.to_string()))
        }
    }
}

/// Membership of one target key in the in-flight set, released on drop.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<String>>,
    key: String,
}

impl<'a> InFlight<'a> {
    fn claim(set: &'a Mutex<HashSet<String>>, key: &str) -> Option<Self> {
        let mut guard = set.lock().unwrap_or_else(|e| e.into_inner());
        if !guard.insert(key.to_string()) {
            return None;
        }
        Some(Self {
            set,
            key: key.to_string(),
        })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut guard = self.set.lock().unwrap_or_else(|e| e.into_inner());
        guard.remove(&self.key);
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
