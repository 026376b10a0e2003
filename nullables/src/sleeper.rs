//! Nullable sleeper — timer delays that return immediately.

use ancr_flow::Sleeper;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// A sleeper that never sleeps.
///
/// Each requested delay is recorded so tests can assert the timing schedule
/// a component asked for.
#[derive(Default)]
pub struct NullSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl NullSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations requested so far, in order.
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }

    /// Total time that would have been slept.
    pub fn total_slept(&self) -> Duration {
        self.slept.lock().unwrap().iter().sum()
    }
}

#[async_trait]
impl Sleeper for NullSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_requested_durations() {
        let sleeper = NullSleeper::new();
        sleeper.sleep(Duration::from_millis(300)).await;
        sleeper.sleep(Duration::from_millis(700)).await;
        assert_eq!(
            sleeper.slept(),
            vec![Duration::from_millis(300), Duration::from_millis(700)]
        );
        assert_eq!(sleeper.total_slept(), Duration::from_millis(1000));
    }
}
