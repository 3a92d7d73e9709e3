//! Presentation seams injected into [`crate::ActionWorkflow`].
//!
//! The workflow never talks to a dialog toolkit or a page directly. A browser
//! front-end, a terminal, or a test fake implements these two traits.

use async_trait::async_trait;

use crate::types::{Confirmation, Dismissal, Indicator};

/// Dialog and notification capability.
///
/// Only one indicator is visible at a time: each `show_*` call replaces the
/// previous one.
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Blocking yes/no prompt. `false` means the operator declined.
    async fn confirm(&self, prompt: &Confirmation) -> bool;

    /// Non-dismissible indicator for an in-flight operation.
    async fn show_pending(&self, indicator: &Indicator);

    /// `dismissal` tells the presenter whether the workflow will close this
    /// indicator on a timer or wait for the operator.
    async fn show_success(&self, indicator: &Indicator, dismissal: Dismissal);

    async fn show_error(&self, indicator: &Indicator);

    /// Close whatever indicator is visible.
    async fn dismiss(&self);

    /// Resolves when the operator dismisses the visible indicator.
    ///
    /// Implementations that cannot be dismissed interactively may return
    /// immediately. For a [`Dismissal::Timed`] success the workflow races this
    /// against its timer, so never resolving is also acceptable there.
    async fn wait_dismissed(&self);
}

/// Follow-up run after a successful action so the view reflects the
/// backend's new state.
#[async_trait]
pub trait Refresher: Send + Sync {
    async fn refresh(&self);
}
