//! Nullable outcome source — scripted flow outcomes.

use ancr_flow::OutcomeSource;
use std::sync::Mutex;

/// An outcome source that returns pre-configured values in order.
///
/// The sequence repeats once exhausted. The success rates passed in are
/// recorded for assertion.
pub struct NullOutcome {
    outcomes: Vec<bool>,
    index: Mutex<usize>,
    rates_seen: Mutex<Vec<f64>>,
}

impl NullOutcome {
    /// Create with a sequence of scripted outcomes.
    pub fn new(outcomes: Vec<bool>) -> Self {
        assert!(!outcomes.is_empty(), "need at least one scripted outcome");
        Self {
            outcomes,
            index: Mutex::new(0),
            rates_seen: Mutex::new(Vec::new()),
        }
    }

    /// Create with a single outcome returned for every draw.
    pub fn constant(outcome: bool) -> Self {
        Self::new(vec![outcome])
    }

    /// The success rates passed to `decide` so far.
    pub fn rates_seen(&self) -> Vec<f64> {
        self.rates_seen.lock().unwrap().clone()
    }
}

impl OutcomeSource for NullOutcome {
    fn decide(&self, success_rate: f64) -> bool {
        self.rates_seen.lock().unwrap().push(success_rate);
        let mut idx = self.index.lock().unwrap();
        let current = *idx % self.outcomes.len();
        *idx += 1;
        self.outcomes[current]
    }
}
