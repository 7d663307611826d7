//! Process-wide session state shared by both screens: the language
//! selection, per-fetch-site request generations and routing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use crate::lang::Language;

/// Single source of truth for the UI language. Screens hold a
/// [`LanguageWatcher`] and re-fetch their labels when it reports a change.
#[derive(Debug, Clone)]
pub struct LanguageSetting {
    tx: Arc<watch::Sender<Language>>,
}

impl LanguageSetting {
    pub fn new(initial: Language) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> Language {
        *self.tx.borrow()
    }

    /// Returns `true` if the value actually changed.
    pub fn set(&self, lang: Language) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == lang {
                false
            } else {
                *current = lang;
                true
            }
        });
        if changed {
            info!(language = %lang, "language changed");
        }
        changed
    }

    pub fn watch(&self) -> LanguageWatcher {
        LanguageWatcher {
            rx: self.tx.subscribe(),
        }
    }
}

#[derive(Debug)]
pub struct LanguageWatcher {
    rx: watch::Receiver<Language>,
}

impl LanguageWatcher {
    pub fn current(&self) -> Language {
        *self.rx.borrow()
    }

    /// Take a pending change, if any, marking it seen.
    pub fn take_change(&mut self) -> Option<Language> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }
}

/// Ticket handed out when a fetch is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic request counter for one fetch site. Only the result carrying
/// the latest ticket may be applied; anything older is stale.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Selector,
    Dashboard(String),
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Some(Route::Selector);
        }
        let code = path.strip_prefix("/dashboard/")?;
        if code.is_empty() || code.contains('/') {
            return None;
        }
        Some(Route::Dashboard(code.to_string()))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Selector => "/".to_string(),
            Route::Dashboard(code) => format!("/dashboard/{}", code),
        }
    }
}
