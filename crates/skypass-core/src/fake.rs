//! Recording presenter and refresher for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::presenter::{Presenter, Refresher};
use crate::types::{Confirmation, Dismissal, Indicator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Confirm(String),
    Pending(String),
    Success(String, String),
    Error(String, String),
    Dismiss,
}

pub struct FakePresenter {
    answer: bool,
    dismisses: bool,
    events: Mutex<Vec<Event>>,
    waits: AtomicUsize,
}

impl FakePresenter {
    fn new(answer: bool, dismisses: bool) -> Self {
        Self {
            answer,
            dismisses,
            events: Mutex::new(Vec::new()),
            waits: AtomicUsize::new(0),
        }
    }

    /// Confirms every prompt; the operator dismisses indicators at once.
    pub fn confirming() -> Self {
        Self::new(true, true)
    }

    pub fn declining() -> Self {
        Self::new(false, true)
    }

    /// Confirms every prompt; the operator never dismisses anything.
    pub fn never_dismissed() -> Self {
        Self::new(true, false)
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn waits(&self) -> usize {
        self.waits.load(Ordering::SeqCst)
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl Presenter for FakePresenter {
    async fn confirm(&self, prompt: &Confirmation) -> bool {
        self.push(Event::Confirm(prompt.text.clone()));
        self.answer
    }

    async fn show_pending(&self, indicator: &Indicator) {
        self.push(Event::Pending(indicator.title.clone()));
    }

    async fn show_success(&self, indicator: &Indicator, _dismissal: Dismissal) {
        self.push(Event::Success(
            indicator.title.clone(),
            indicator.text.clone(),
        ));
    }

    async fn show_error(&self, indicator: &Indicator) {
        self.push(Event::Error(indicator.title.clone(), indicator.text.clone()));
    }

    async fn dismiss(&self) {
        self.push(Event::Dismiss);
    }

    async fn wait_dismissed(&self) {
        self.waits.fetch_add(1, Ordering::SeqCst);
        if !self.dismisses {
            std::future::pending::<()>().await;
        }
    }
}

#[derive(Default)]
pub struct FakeRefresher {
    count: AtomicUsize,
}

impl FakeRefresher {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Refresher for FakeRefresher {
    async fn refresh(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
