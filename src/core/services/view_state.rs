//! Guards view data against out-of-order refreshes.
//!
//! Every refresh takes a ticket before fetching. When the fetch completes the
//! result is only stored if no newer ticket has been issued in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::errors::{FinanceError, Result};

#[derive(Debug, Default)]
pub struct RefreshGuard {
    latest: AtomicU64,
}

/// Token identifying one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RefreshTicket {
        RefreshTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Last accepted value of a view, plus the error of the last failed refresh.
#[derive(Debug)]
pub struct ViewState<T> {
    guard: RefreshGuard,
    value: Option<T>,
    last_error: Option<FinanceError>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            guard: RefreshGuard::default(),
            value: None,
            last_error: None,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(&self) -> RefreshTicket {
        self.guard.begin()
    }

    /// Stores the outcome of the refresh identified by `ticket`.
    ///
    /// Returns `false` and discards the outcome when a newer refresh has
    /// started. A failure keeps the previous value and records the error.
    pub fn apply(&mut self, ticket: RefreshTicket, outcome: Result<T>) -> bool {
        if !self.guard.is_current(ticket) {
            debug!(ticket = ticket.0, "discarding stale refresh");
            return false;
        }
        match outcome {
            Ok(value) => {
                self.value = Some(value);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
        true
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn last_error(&self) -> Option<&FinanceError> {
        self.last_error.as_ref()
    }
}
