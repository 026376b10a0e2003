//! Threshold-colored trust score badges.

use ancr_types::TrustLevel;

/// Render a score as a badge: the value plus its threshold level.
///
/// Thresholds: >= 75 high, >= 50 medium, else low.
pub fn trust_badge(score: f64) -> String {
    format!("{score:.1} [{}]", TrustLevel::from_score(score))
}
