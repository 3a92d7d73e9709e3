pub mod alert;
pub mod config;
pub mod connection;
pub mod verify;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context as _;
use skypass_core::{ActionWorkflow, Config, Dashboard, DashboardClient, Settled};

use crate::terminal::{TerminalPresenter, TerminalRefresher};

/// Resolved global flags shared by every subcommand.
pub struct Context {
    pub config: Config,
    pub assume_yes: bool,
    pub json: bool,
}

impl Context {
    pub fn dashboard(&self) -> anyhow::Result<Dashboard> {
        let client =
            DashboardClient::new(&self.config).context("failed to build the backend client")?;
        let workflow = ActionWorkflow::new(
            Arc::new(TerminalPresenter::new(self.assume_yes)),
            Arc::new(TerminalRefresher),
        )
        .with_success_display(self.config.success_display());
        Ok(Dashboard::new(workflow, client))
    }
}

pub fn block_on<F: Future>(future: F) -> anyhow::Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    Ok(rt.block_on(future))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the settled state and turn a failed action into a non-zero exit.
///
/// A declined prompt prints nothing further.
pub fn finish(settled: &Settled, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(settled)?;
    } else if *settled == Settled::Busy {
        eprintln!("Ya hay una acción en curso para este elemento.");
    }

    if let Settled::Failed { kind, .. } = settled {
        anyhow::bail!("action failed ({})", failure_label(*kind));
    }
    Ok(())
}

fn failure_label(kind: skypass_core::FailureKind) -> &'static str {
    match kind {
        skypass_core::FailureKind::Transport => "backend unreachable or invalid response",
        skypass_core::FailureKind::Application => "rejected by backend",
    }
}
