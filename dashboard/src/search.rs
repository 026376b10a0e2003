//! Debounced free-text search.
//!
//! A single cancelable timer: each submission replaces the pending term and
//! restarts the quiet period, so only the latest term's request fires. The
//! struct is a plain state machine over caller-supplied instants; the
//! interactive shell drives it from its event loop.

use std::time::{Duration, Instant};

/// Default quiet period before a search fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Clone, Debug)]
struct PendingSearch {
    term: String,
    deadline: Instant,
}

/// Debounce state for the identity search box.
#[derive(Clone, Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<PendingSearch>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a keystroke: the pending term is replaced and the timer
    /// restarts from `now`.
    pub fn submit(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some(PendingSearch {
            term: term.into(),
            deadline: now + self.delay,
        });
    }

    /// Drop any pending search.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending search becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending term if its quiet period has elapsed.
    ///
    /// Returns the term at most once per submission chain; firing clears the
    /// pending state.
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.term),
            _ => None,
        }
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_submissions_fire_once_with_last_term() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(300));
        let t0 = Instant::now();

        debouncer.submit("a", t0);
        debouncer.submit("an", t0 + Duration::from_millis(100));
        debouncer.submit("anchor", t0 + Duration::from_millis(200));

        // Still inside the quiet period of the last keystroke.
        assert_eq!(debouncer.fire(t0 + Duration::from_millis(400)), None);

        let mut fetches = Vec::new();
        if let Some(term) = debouncer.fire(t0 + Duration::from_millis(500)) {
            fetches.push(term);
        }
        // Nothing further fires.
        assert_eq!(debouncer.fire(t0 + Duration::from_millis(900)), None);

        assert_eq!(fetches, vec!["anchor".to_string()]);
    }

    #[test]
    fn fires_exactly_at_the_deadline() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(300));
        let t0 = Instant::now();
        debouncer.submit("term", t0);

        assert_eq!(debouncer.deadline(), Some(t0 + Duration::from_millis(300)));
        assert_eq!(
            debouncer.fire(t0 + Duration::from_millis(300)),
            Some("term".to_string())
        );
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_drops_the_pending_term() {
        let mut debouncer = SearchDebouncer::default();
        let t0 = Instant::now();
        debouncer.submit("term", t0);
        debouncer.cancel();
        assert_eq!(debouncer.fire(t0 + Duration::from_secs(1)), None);
    }
}
