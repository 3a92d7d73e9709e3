//! `skypass-core`: action workflow and backend client for the Skypass ISP
//! administration dashboard.
//!
//! Every dashboard button follows the same shape: ask for confirmation when
//! the action is consequential, show a pending indicator while one backend
//! call runs, then report success (and refresh the view) or failure (and
//! leave the view alone).
//!
//! ```text
//! trigger ──► ActionWorkflow::run ──► Presenter::confirm?
//!                   │                       │ yes
//!                   │                       ▼
//!                   │               Presenter::show_pending
//!                   │                       │
//!                   ▼                       ▼
//!            DashboardClient  ◄──── operation() (exactly once)
//!                   │
//!                   ▼
//!       show_success ─► Refresher::refresh   |   show_error ─► wait_dismissed
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use skypass_core::{ActionWorkflow, Config, Dashboard, DashboardClient};
//!
//! let config = Config::load("skypass.yaml".as_ref())?;
//! let workflow = ActionWorkflow::new(Arc::new(my_presenter), Arc::new(my_refresher))
//!     .with_success_display(config.success_display());
//! let dashboard = Dashboard::new(workflow, DashboardClient::new(&config)?);
//! let settled = dashboard.resend_alert(7, "Fibra Norte").await;
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod error;
pub mod presenter;
pub mod types;
pub mod workflow;

#[cfg(test)]
mod fake;

pub use actions::Dashboard;
pub use client::DashboardClient;
pub use config::Config;
pub use error::{ActionError, Result, SkypassError};
pub use presenter::{Presenter, Refresher};
pub use types::{
    ActionRequest, ActionResult, ActionTarget, Confirmation, Dismissal, FailureKind, Indicator,
    Outcome, Phase, Settled,
};
pub use workflow::ActionWorkflow;
