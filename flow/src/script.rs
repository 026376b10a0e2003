//! Per-platform step scripts.
//!
//! Scripts are fixed data: an ordered list of (title, description, duration)
//! steps played back by the runner. Platforms without a dedicated script get
//! the generic fallback.

use ancr_types::Platform;
use std::time::Duration;

/// One step of a verification flow script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowStep {
    pub title: &'static str,
    pub description: &'static str,
    pub duration: Duration,
}

const fn step(title: &'static str, description: &'static str, millis: u64) -> FlowStep {
    FlowStep {
        title,
        description,
        duration: Duration::from_millis(millis),
    }
}

const GITHUB: [FlowStep; 5] = [
    step("Contacting GitHub", "Opening a secure session with github.com", 600),
    step("Requesting authorization", "Asking for read access to the public profile", 900),
    step("Fetching profile", "Downloading profile metadata and repositories", 800),
    step("Checking account age", "Confirming the account predates this request", 500),
    step("Confirming ownership", "Matching the claimed profile URL to the account", 1100),
];

const TWITTER: [FlowStep; 4] = [
    step("Contacting Twitter", "Opening a secure session with twitter.com", 500),
    step("Requesting authorization", "Asking for read access to the public profile", 1000),
    step("Fetching profile", "Downloading handle, bio, and follower counts", 700),
    step("Confirming ownership", "Matching the claimed profile URL to the account", 1200),
];

const LINKEDIN: [FlowStep; 5] = [
    step("Contacting LinkedIn", "Opening a secure session with linkedin.com", 700),
    step("Requesting authorization", "Asking for read access to the public profile", 900),
    step("Fetching profile", "Downloading headline and position history", 800),
    step("Cross-checking employer", "Comparing listed positions with public records", 600),
    step("Confirming ownership", "Matching the claimed profile URL to the account", 1000),
];

const INSTAGRAM: [FlowStep; 4] = [
    step("Contacting Instagram", "Opening a secure session with instagram.com", 600),
    step("Requesting authorization", "Asking for read access to the public profile", 800),
    step("Fetching profile", "Downloading handle and post statistics", 700),
    step("Confirming ownership", "Matching the claimed profile URL to the account", 1100),
];

const FACEBOOK: [FlowStep; 4] = [
    step("Contacting Facebook", "Opening a secure session with facebook.com", 600),
    step("Requesting authorization", "Asking for read access to the public profile", 900),
    step("Fetching profile", "Downloading name and page metadata", 800),
    step("Confirming ownership", "Matching the claimed profile URL to the account", 1000),
];

/// Fallback for platforms outside the enumerated set.
const DEFAULT: [FlowStep; 4] = [
    step("Contacting platform", "Opening a secure session with the platform", 600),
    step("Requesting authorization", "Asking for read access to the public profile", 900),
    step("Fetching profile", "Downloading public profile metadata", 800),
    step("Confirming ownership", "Matching the claimed profile URL to the account", 1000),
];

/// The step script for a platform; unrecognized platforms get the fallback.
pub fn script_for(platform: &Platform) -> &'static [FlowStep] {
    match platform {
        Platform::GitHub => &GITHUB,
        Platform::Twitter => &TWITTER,
        Platform::LinkedIn => &LINKEDIN,
        Platform::Instagram => &INSTAGRAM,
        Platform::Facebook => &FACEBOOK,
        Platform::Other(_) => &DEFAULT,
    }
}
