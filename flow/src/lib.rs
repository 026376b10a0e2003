//! Simulated OAuth-style verification flows.
//!
//! Each known platform has a scripted sequence of timed steps. A run walks
//! the steps strictly in order, emitting progress events, then reports a
//! success/failure outcome drawn once per run from a configured probability.
//! Failure is surfaced only on the final step; there is no retry, no
//! cancellation, and no persisted intermediate state.
//!
//! Sleeping and the outcome draw go through the [`Sleeper`] and
//! [`OutcomeSource`] seams so tests run deterministically and instantly.

pub mod error;
pub mod runner;
pub mod runtime;
pub mod script;

pub use error::FlowError;
pub use runner::{FlowConfig, FlowEvent, FlowReport, FlowRequest, FlowRunner, DEFAULT_SUCCESS_RATE};
pub use runtime::{OutcomeSource, RandomOutcome, Sleeper, TokioSleeper};
pub use script::{script_for, FlowStep};
