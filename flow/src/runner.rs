//! Flow runner — plays a platform script and reports the outcome.

use ancr_types::{AnchorId, Platform};
use std::time::Duration;

use crate::error::FlowError;
use crate::runtime::{OutcomeSource, RandomOutcome, Sleeper, TokioSleeper};
use crate::script::{script_for, FlowStep};

/// Default probability that a run ends in success.
///
/// Observed client revisions disagreed on this constant (0.85 vs 1.0), so it
/// is configuration, not a hard-coded value; this default is the conservative
/// of the two.
pub const DEFAULT_SUCCESS_RATE: f64 = 0.85;

/// Delay between the final step and the reported outcome.
pub const DEFAULT_TRAILING_DELAY: Duration = Duration::from_millis(600);

/// Tunables for a flow run.
#[derive(Clone, Copy, Debug)]
pub struct FlowConfig {
    /// Probability in [0, 1] that a run succeeds.
    pub success_rate: f64,
    /// Pause after the last step before the outcome is revealed.
    pub trailing_delay: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            success_rate: DEFAULT_SUCCESS_RATE,
            trailing_delay: DEFAULT_TRAILING_DELAY,
        }
    }
}

/// What to verify: which identity, against which platform profile.
///
/// The profile URL is display-only here; persisting the verification record
/// on success is the caller's job.
#[derive(Clone, Debug)]
pub struct FlowRequest {
    pub anchor_id: AnchorId,
    pub platform: Platform,
    pub profile_url: String,
}

/// Progress events emitted while a run is in flight.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowEvent {
    StepStarted {
        index: usize,
        title: &'static str,
        description: &'static str,
    },
    /// A step finished; `progress` is completed-steps / total-steps.
    StepCompleted { index: usize, progress: f64 },
    /// The final step failed. Earlier steps always complete normally.
    StepFailed { index: usize, progress: f64 },
    Finished { success: bool },
}

/// Summary of a finished run.
#[derive(Clone, Debug)]
pub struct FlowReport {
    pub success: bool,
    pub steps_total: usize,
    pub steps_completed: usize,
    /// Every event emitted, in order.
    pub events: Vec<FlowEvent>,
}

/// Plays platform scripts step by step.
pub struct FlowRunner<S: Sleeper, O: OutcomeSource> {
    config: FlowConfig,
    sleeper: S,
    outcome: O,
}

impl FlowRunner<TokioSleeper, RandomOutcome> {
    /// Production runner: tokio timer + thread-local RNG.
    pub fn new(config: FlowConfig) -> Result<Self, FlowError> {
        Self::with_runtime(config, TokioSleeper, RandomOutcome)
    }
}

impl<S: Sleeper, O: OutcomeSource> FlowRunner<S, O> {
    pub fn with_runtime(config: FlowConfig, sleeper: S, outcome: O) -> Result<Self, FlowError> {
        if !(0.0..=1.0).contains(&config.success_rate) || config.success_rate.is_nan() {
            return Err(FlowError::InvalidSuccessRate(config.success_rate));
        }
        Ok(Self {
            config,
            sleeper,
            outcome,
        })
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// The script a request would play.
    pub fn script(&self, request: &FlowRequest) -> &'static [FlowStep] {
        script_for(&request.platform)
    }

    /// Run the flow to completion, invoking `on_event` for each progress
    /// event as it happens. Steps execute strictly in sequence; the outcome
    /// is drawn once up front and revealed only after the trailing delay.
    pub async fn run(
        &self,
        request: &FlowRequest,
        mut on_event: impl FnMut(&FlowEvent),
    ) -> FlowReport {
        let script = script_for(&request.platform);
        let total = script.len();
        let success = self.outcome.decide(self.config.success_rate);

        tracing::debug!(
            anchor = %request.anchor_id,
            platform = %request.platform,
            steps = total,
            "starting verification flow"
        );

        fn emit(
            events: &mut Vec<FlowEvent>,
            on_event: &mut dyn FnMut(&FlowEvent),
            event: FlowEvent,
        ) {
            on_event(&event);
            events.push(event);
        }

        let mut events = Vec::with_capacity(total * 2 + 1);
        let mut steps_completed = 0;
        for (index, step) in script.iter().enumerate() {
            emit(
                &mut events,
                &mut on_event,
                FlowEvent::StepStarted {
                    index,
                    title: step.title,
                    description: step.description,
                },
            );

            self.sleeper.sleep(step.duration).await;

            let is_last = index + 1 == total;
            if is_last && !success {
                // The run was doomed from the start, but only the final
                // step shows it.
                emit(
                    &mut events,
                    &mut on_event,
                    FlowEvent::StepFailed {
                        index,
                        progress: index as f64 / total as f64,
                    },
                );
            } else {
                steps_completed += 1;
                emit(
                    &mut events,
                    &mut on_event,
                    FlowEvent::StepCompleted {
                        index,
                        progress: steps_completed as f64 / total as f64,
                    },
                );
            }
        }

        self.sleeper.sleep(self.config.trailing_delay).await;
        emit(&mut events, &mut on_event, FlowEvent::Finished { success });

        tracing::debug!(
            anchor = %request.anchor_id,
            platform = %request.platform,
            success,
            "verification flow finished"
        );

        FlowReport {
            success,
            steps_total: total,
            steps_completed,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Sleeper that returns immediately, recording each requested duration.
    #[derive(Default)]
    struct InstantSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Sleeper for InstantSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    /// Outcome source with a fixed answer.
    struct FixedOutcome(bool);

    impl OutcomeSource for FixedOutcome {
        fn decide(&self, _success_rate: f64) -> bool {
            self.0
        }
    }

    fn request(platform: Platform) -> FlowRequest {
        FlowRequest {
            anchor_id: AnchorId(7),
            platform,
            profile_url: "https://example.com/profile".into(),
        }
    }

    fn runner(success: bool) -> FlowRunner<InstantSleeper, FixedOutcome> {
        FlowRunner::with_runtime(
            FlowConfig::default(),
            InstantSleeper::default(),
            FixedOutcome(success),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn visits_every_step_once_in_order() {
        for platform in Platform::KNOWN {
            let runner = runner(true);
            let req = request(platform.clone());
            let script = script_for(&platform);

            let report = runner.run(&req, |_| {}).await;

            let started: Vec<usize> = report
                .events
                .iter()
                .filter_map(|e| match e {
                    FlowEvent::StepStarted { index, .. } => Some(*index),
                    _ => None,
                })
                .collect();
            assert_eq!(
                started,
                (0..script.len()).collect::<Vec<_>>(),
                "steps out of order for {platform}"
            );
            assert_eq!(report.steps_completed, script.len());
        }
    }

    #[tokio::test]
    async fn outcome_matches_rendered_state_on_success() {
        let runner = runner(true);
        let report = runner.run(&request(Platform::GitHub), |_| {}).await;

        assert!(report.success);
        assert!(!report
            .events
            .iter()
            .any(|e| matches!(e, FlowEvent::StepFailed { .. })));
        assert_eq!(
            report.events.last(),
            Some(&FlowEvent::Finished { success: true })
        );
    }

    #[tokio::test]
    async fn failure_surfaces_only_on_final_step() {
        let runner = runner(false);
        let req = request(Platform::Twitter);
        let total = script_for(&Platform::Twitter).len();

        let report = runner.run(&req, |_| {}).await;

        assert!(!report.success);
        assert_eq!(report.steps_completed, total - 1);

        let failed: Vec<usize> = report
            .events
            .iter()
            .filter_map(|e| match e {
                FlowEvent::StepFailed { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec![total - 1], "only the last step may fail");
        assert_eq!(
            report.events.last(),
            Some(&FlowEvent::Finished { success: false })
        );
    }

    #[tokio::test]
    async fn progress_fraction_is_completed_over_total() {
        let runner = runner(true);
        let req = request(Platform::GitHub);
        let total = script_for(&Platform::GitHub).len();

        let report = runner.run(&req, |_| {}).await;

        let progress: Vec<f64> = report
            .events
            .iter()
            .filter_map(|e| match e {
                FlowEvent::StepCompleted { progress, .. } => Some(*progress),
                _ => None,
            })
            .collect();
        for (i, p) in progress.iter().enumerate() {
            let expected = (i + 1) as f64 / total as f64;
            assert!((p - expected).abs() < f64::EPSILON);
        }
        assert!((progress.last().unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn outcome_revealed_after_trailing_delay() {
        let sleeper = InstantSleeper::default();
        let runner = FlowRunner::with_runtime(
            FlowConfig::default(),
            sleeper,
            FixedOutcome(true),
        )
        .unwrap();
        let req = request(Platform::GitHub);
        let script = script_for(&Platform::GitHub);

        let report = runner.run(&req, |_| {}).await;
        assert!(report.success);

        let slept = runner.sleeper.slept.lock().unwrap();
        let expected: Vec<Duration> = script
            .iter()
            .map(|s| s.duration)
            .chain(std::iter::once(DEFAULT_TRAILING_DELAY))
            .collect();
        assert_eq!(*slept, expected);
    }

    #[tokio::test]
    async fn events_stream_matches_report() {
        let runner = runner(false);
        let mut streamed = Vec::new();
        let report = runner
            .run(&request(Platform::Other("mastodon".into())), |e| {
                streamed.push(e.clone())
            })
            .await;
        assert_eq!(streamed, report.events);
    }

    #[test]
    fn invalid_success_rate_is_rejected() {
        for rate in [-0.1, 1.5, f64::NAN] {
            let config = FlowConfig {
                success_rate: rate,
                ..FlowConfig::default()
            };
            let result =
                FlowRunner::with_runtime(config, InstantSleeper::default(), FixedOutcome(true));
            assert!(matches!(result, Err(FlowError::InvalidSuccessRate(_))));
        }
    }
}
