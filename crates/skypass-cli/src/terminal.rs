//! Terminal implementations of the presentation seams.
//!
//! Everything is drawn on stderr so `--json` output on stdout stays clean.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use skypass_core::{Confirmation, Dismissal, Indicator, Presenter, Refresher};

// ---------------------------------------------------------------------------
// TerminalPresenter
// ---------------------------------------------------------------------------

pub struct TerminalPresenter {
    assume_yes: bool,
    attended: bool,
    spinner: Mutex<Option<ProgressBar>>,
    timed_success: AtomicBool,
}

impl TerminalPresenter {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            attended: console::user_attended_stderr(),
            spinner: Mutex::new(None),
            timed_success: AtomicBool::new(false),
        }
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

#[async_trait]
impl Presenter for TerminalPresenter {
    async fn confirm(&self, prompt: &Confirmation) -> bool {
        if self.assume_yes {
            eprintln!("{} {} [{}: --yes]", prompt.title, prompt.text, prompt.confirm_label);
            return true;
        }
        if !self.attended {
            eprintln!(
                "{} {} [{}: no interactive terminal, pass --yes to confirm]",
                prompt.title, prompt.text, prompt.cancel_label
            );
            return false;
        }

        let question = format!("{} {}", prompt.title, prompt.text);
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(question)
                .default(false)
                .interact()
        })
        .await;

        match answer {
            Ok(Ok(confirmed)) => confirmed,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "confirmation prompt failed; treating as declined");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "confirmation task failed; treating as declined");
                false
            }
        }
    }

    async fn show_pending(&self, indicator: &Indicator) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("{} {}", indicator.title, indicator.text));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let previous = self
            .spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(spinner);
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    async fn show_success(&self, indicator: &Indicator, dismissal: Dismissal) {
        self.timed_success
            .store(dismissal == Dismissal::Timed, Ordering::SeqCst);
        eprintln!("✓ {}: {}", indicator.title, indicator.text);
    }

    async fn show_error(&self, indicator: &Indicator) {
        self.timed_success.store(false, Ordering::SeqCst);
        eprintln!("✗ {}: {}", indicator.title, indicator.text);
    }

    async fn dismiss(&self) {
        if let Some(spinner) = self.take_spinner() {
            spinner.finish_and_clear();
        }
    }

    async fn wait_dismissed(&self) {
        if !self.attended {
            return;
        }
        if self.timed_success.swap(false, Ordering::SeqCst) {
            // The workflow's timer closes a timed success.
            std::future::pending::<()>().await;
        }

        eprintln!("Pulsa Enter para continuar");
        let read = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| ())
        })
        .await;
        if let Ok(Err(e)) = read {
            tracing::debug!(error = %e, "stdin closed while waiting for dismissal");
        }
    }
}

// ---------------------------------------------------------------------------
// TerminalRefresher
// ---------------------------------------------------------------------------

/// A terminal has no page to reload: the refresh is a notice that the
/// backend state changed.
pub struct TerminalRefresher;

#[async_trait]
impl Refresher for TerminalRefresher {
    async fn refresh(&self) {
        tracing::info!("view refresh requested");
        eprintln!("↻ Datos actualizados en el servidor");
    }
}
