//! Debounced symbol autocomplete. One instance per input field; instances
//! share no timers or selection state. The owning view drives it with the
//! current instant and performs the actual search when a debounce fires.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::model::StockHit;

pub const DEBOUNCE: Duration = Duration::from_millis(300);
pub const BLUR_GRACE: Duration = Duration::from_millis(200);
pub const RESULT_LIMIT: usize = 10;

/// Where suggestions come from. The TUI implements this over the remote
/// client; tests hand back canned hits.
pub trait SymbolSource {
    fn search(&mut self, keyword: &str, limit: usize) -> Result<Vec<StockHit>>;
}

struct PendingSearch {
    fire_at: Instant,
    keyword: String,
}

/// An issued search, identified by token. Responses carrying a token other
/// than the newest issued one are stale and get dropped on `accept`.
#[derive(Debug, PartialEq, Eq)]
pub struct SearchTicket {
    pub token: u64,
    pub keyword: String,
}

/// Keyboard outcomes the owning input has to act on.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Handled,
    /// The active item was committed: write this symbol into the input and
    /// re-run anything that depends on its value.
    Committed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

#[derive(Default)]
pub struct SymbolSuggest {
    pending: Option<PendingSearch>,
    hide_at: Option<Instant>,
    token: u64,
    results: Vec<StockHit>,
    active: usize,
    open: bool,
}

impl SymbolSuggest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input changed. Empty input hides the dropdown and cancels any
    /// pending debounce without issuing a request; otherwise only the last
    /// edit inside the quiet period schedules a search (trailing edge).
    pub fn on_input(&mut self, value: &str, now: Instant) {
        self.pending = None;
        let keyword = value.trim();
        if keyword.is_empty() {
            self.close();
            return;
        }
        self.hide_at = None;
        self.pending = Some(PendingSearch {
            fire_at: now + DEBOUNCE,
            keyword: keyword.to_string(),
        });
    }

    /// Refocusing a prefilled field re-triggers the search-and-show flow.
    pub fn on_focus(&mut self, value: &str, now: Instant) {
        self.hide_at = None;
        if !value.trim().is_empty() {
            self.on_input(value, now);
        }
    }

    /// Hide after a short grace so a click on a dropdown item, which blurs
    /// the input first, still lands.
    pub fn on_blur(&mut self, now: Instant) {
        self.hide_at = Some(now + BLUR_GRACE);
    }

    /// Due-timer check; returns the search to perform, if any. The caller
    /// runs the request and reports back through `accept`.
    pub fn take_due_search(&mut self, now: Instant) -> Option<SearchTicket> {
        if let Some(hide_at) = self.hide_at
            && now >= hide_at
        {
            self.hide_at = None;
            self.open = false;
        }

        let due = self.pending.as_ref().is_some_and(|p| now >= p.fire_at);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        self.token += 1;
        Some(SearchTicket {
            token: self.token,
            keyword: pending.keyword,
        })
    }

    /// Deliver results for an issued search. Stale tokens are discarded so
    /// a slow early response cannot clobber a newer one. Empty or failed
    /// result sets hide the dropdown.
    pub fn accept(&mut self, token: u64, results: Result<Vec<StockHit>>) {
        if token != self.token {
            return;
        }
        match results {
            Ok(hits) if !hits.is_empty() => {
                self.results = hits;
                self.active = 0;
                self.open = true;
            }
            _ => self.close(),
        }
    }

    /// Convenience used by synchronous callers: fire any due search against
    /// the source and feed the answer straight back.
    pub fn poll(&mut self, now: Instant, source: &mut dyn SymbolSource) {
        if let Some(ticket) = self.take_due_search(now) {
            let res = source.search(&ticket.keyword, RESULT_LIMIT);
            self.accept(ticket.token, res);
        }
    }

    /// Keyboard navigation; only consumes keys while the dropdown is open
    /// and non-empty.
    pub fn on_key(&mut self, key: NavKey) -> KeyOutcome {
        if !self.open || self.results.is_empty() {
            return KeyOutcome::Ignored;
        }
        let n = self.results.len();
        match key {
            NavKey::Down => {
                self.active = (self.active + 1) % n;
                KeyOutcome::Handled
            }
            NavKey::Up => {
                self.active = if self.active == 0 { n - 1 } else { self.active - 1 };
                KeyOutcome::Handled
            }
            NavKey::Enter => {
                let symbol = self.results[self.active].symbol.clone();
                self.close();
                KeyOutcome::Committed(symbol)
            }
            NavKey::Escape => {
                self.close();
                KeyOutcome::Handled
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn results(&self) -> &[StockHit] {
        &self.results
    }

    fn close(&mut self) {
        // Anything still in flight is stale once the dropdown closes.
        self.token += 1;
        self.open = false;
        self.results.clear();
        self.active = 0;
    }
}

#[cfg(test)]
#[path = "tests/suggest_tests.rs"]
mod tests;
