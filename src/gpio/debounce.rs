//! Minimum re-trigger interval for edge events.
//!
//! # Design Decisions
//! - The first edge on a pin is always accepted and delivered immediately
//! - Edges up to and including `window` after the last *accepted* edge are dropped
//! - Suppressed edges do not extend the window
//! - Every backend filters in software through [`DebouncedHandler`]; the
//!   kernel's line debounce (a stable-level filter) is never used

use std::time::{Duration, Instant};

use crate::gpio::types::{EdgeHandler, PinId};

/// Per-pin debounce filter.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Decide whether an edge observed at `now` should reach the handler.
    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.saturating_duration_since(last) <= self.window => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

/// An edge handler behind its pin's debounce filter.
pub struct DebouncedHandler {
    debouncer: Debouncer,
    handler: EdgeHandler,
}

impl DebouncedHandler {
    pub fn new(window: Duration, handler: EdgeHandler) -> Self {
        Self {
            debouncer: Debouncer::new(window),
            handler,
        }
    }

    /// Run the handler for an edge on `pin` observed at `at`, unless the
    /// filter suppresses it. Returns whether the handler ran.
    pub fn fire(&mut self, pin: PinId, at: Instant) -> bool {
        if !self.debouncer.accept(at) {
            tracing::trace!(%pin, "Edge suppressed by debounce");
            return false;
        }
        (self.handler)(pin);
        true
    }

    pub fn window(&self) -> Duration {
        self.debouncer.window()
    }
}
