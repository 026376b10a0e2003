//! Runtime seams for the flow runner: sleeping and the outcome draw.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Abstraction over timer delays so tests can skip them.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Source of the per-run success/failure outcome.
pub trait OutcomeSource: Send + Sync {
    /// Decide a run's outcome given a success probability in [0, 1].
    fn decide(&self, success_rate: f64) -> bool;
}

/// Production outcome source backed by the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomOutcome;

impl OutcomeSource for RandomOutcome {
    fn decide(&self, success_rate: f64) -> bool {
        rand::thread_rng().gen_bool(success_rate.clamp(0.0, 1.0))
    }
}
