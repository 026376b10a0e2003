//! Nullable clock — deterministic time for testing.

use ancr_types::Timestamp;
use std::cell::Cell;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<i64>,
}

impl NullClock {
    pub fn new(initial_secs: i64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::from_unix(self.current.get()).unwrap_or_else(Timestamp::now)
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: i64) {
        self.current.set(self.current.get() + secs);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: i64) {
        self.current.set(secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_only_moves_when_advanced() {
        let clock = NullClock::new(1_000);
        let t0 = clock.now();
        assert_eq!(clock.now(), t0);
        clock.advance(60);
        assert_eq!(t0.elapsed_secs(clock.now()), 60);
    }
}
