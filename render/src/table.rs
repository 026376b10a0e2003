//! Fixed-width text tables for dashboard records.

use ancr_types::{
    AnchorId, ConsistencyCheck, Identity, IdentityDetails, Statistics, Timestamp, TrustHistory,
    Verification,
};
use ancr_utils::format_relative;

use crate::badge::trust_badge;
use crate::text::{fit, sanitize, shorten_key, shorten_url, URL_DISPLAY_LEN};

/// How many events the detail view shows.
const DETAIL_EVENT_LIMIT: usize = 5;

fn row(cells: &[(&str, usize)]) -> String {
    let mut line = String::new();
    for (i, (text, width)) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(&fit(text, *width));
    }
    line.trim_end().to_string()
}

fn rule(cells: &[(&str, usize)]) -> String {
    let total: usize = cells.iter().map(|(_, w)| w).sum::<usize>() + (cells.len() - 1) * 2;
    "-".repeat(total)
}

fn when(ts: Timestamp, now: Timestamp) -> String {
    format_relative(ts.elapsed_secs(now))
}

/// Identity list table.
pub fn identities_table(rows: &[Identity], now: Timestamp) -> String {
    if rows.is_empty() {
        return "(no identities)".to_string();
    }
    let header = [
        ("ID", 6),
        ("PUBLIC KEY", 43),
        ("TRUST", 14),
        ("CREATED", 16),
    ];
    let mut out = vec![row(&header), rule(&header)];
    for identity in rows {
        out.push(row(&[
            (&identity.anchor_id.to_string(), 6),
            (&shorten_key(&identity.user_pub_key), 43),
            (&trust_badge(identity.trust_score), 14),
            (&when(identity.created_at, now), 16),
        ]));
    }
    out.join("\n")
}

/// Verification list table.
pub fn verifications_table(rows: &[Verification], now: Timestamp) -> String {
    if rows.is_empty() {
        return "(no verifications)".to_string();
    }
    let header = [
        ("ID", 6),
        ("ANCHOR", 6),
        ("PLATFORM", 12),
        ("PROFILE", 43),
        ("VERIFIED", 16),
        ("TRUST", 14),
    ];
    let mut out = vec![row(&header), rule(&header)];
    for v in rows {
        let trust = v
            .trust_score
            .map(trust_badge)
            .unwrap_or_else(|| "-".to_string());
        out.push(row(&[
            (&v.verification_id.to_string(), 6),
            (&v.anchor_id.to_string(), 6),
            (&sanitize(&v.platform_name), 12),
            (&shorten_url(&v.profile_url, URL_DISPLAY_LEN), 43),
            (&when(v.verified_at, now), 16),
            (&trust, 14),
        ]));
    }
    out.join("\n")
}

/// Consistency check list table.
pub fn checks_table(rows: &[ConsistencyCheck], now: Timestamp) -> String {
    if rows.is_empty() {
        return "(no consistency checks)".to_string();
    }
    let header = [
        ("ID", 6),
        ("GROUP", 18),
        ("PLATFORM A", 12),
        ("PLATFORM B", 12),
        ("SCORE", 14),
        ("CHECKED", 16),
    ];
    let mut out = vec![row(&header), rule(&header)];
    for check in rows {
        out.push(row(&[
            (&check.check_id.to_string(), 6),
            (&sanitize(&check.user_group), 18),
            (&sanitize(&check.platform_a), 12),
            (&sanitize(&check.platform_b), 12),
            (&trust_badge(check.consistency_score), 14),
            (&when(check.checked_at, now), 16),
        ]));
    }
    out.join("\n")
}

/// Trust score history for one identity.
pub fn history_table(anchor_id: AnchorId, history: &TrustHistory, now: Timestamp) -> String {
    let mut out = vec![
        format!("Trust score history - identity #{anchor_id}"),
        format!("Current score: {}", trust_badge(history.current_score)),
    ];
    if history.history.is_empty() {
        out.push("(no events)".to_string());
        return out.join("\n");
    }
    let header = [("EVENT", 26), ("PLATFORM", 12), ("WHEN", 16), ("PREV", 8)];
    out.push(row(&header));
    out.push(rule(&header));
    for entry in &history.history {
        let platform = entry.platform.as_deref().unwrap_or("-");
        let prev = entry
            .prev_score
            .map(|s| format!("{s:.1}"))
            .unwrap_or_else(|| "-".to_string());
        out.push(row(&[
            (&sanitize(&entry.event_type), 26),
            (&sanitize(platform), 12),
            (&when(entry.time_stamp, now), 16),
            (&prev, 8),
        ]));
    }
    out.join("\n")
}

/// Aggregate statistics block.
pub fn statistics_block(stats: &Statistics) -> String {
    [
        format!("Identities:          {}", stats.total_identities),
        format!("Verifications:       {}", stats.total_verifications),
        format!("Avg trust score:     {:.1}", stats.avg_trust_score),
        format!("Avg consistency:     {:.1}", stats.avg_consistency_score),
    ]
    .join("\n")
}

/// Detail view: the identity plus its verifications and recent events.
pub fn details_block(details: &IdentityDetails, now: Timestamp) -> String {
    let identity = &details.identity;
    let mut out = vec![
        format!("Identity #{}", identity.anchor_id),
        format!("Public key: {}", shorten_key(&identity.user_pub_key)),
        format!("Trust score: {}", trust_badge(identity.trust_score)),
        format!("Created: {}", when(identity.created_at, now)),
        String::new(),
        format!("Verifications ({})", details.verifications.len()),
    ];
    for (i, v) in details.verifications.iter().enumerate() {
        out.push(format!(
            "  {}. {}: {}",
            i + 1,
            sanitize(&v.platform_name),
            shorten_url(&v.profile_url, URL_DISPLAY_LEN)
        ));
    }
    out.push(String::new());
    out.push(format!("Events ({})", details.events.len()));
    for (i, event) in details.events.iter().take(DETAIL_EVENT_LIMIT).enumerate() {
        let platform = event.platform.as_deref().unwrap_or("-");
        out.push(format!(
            "  {}. {} on {} ({})",
            i + 1,
            sanitize(&event.event_type),
            sanitize(platform),
            when(event.time_stamp, now)
        ));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ancr_types::ReputationEvent;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn identity(id: u64, score: f64) -> Identity {
        Identity {
            anchor_id: AnchorId(id),
            user_pub_key: "ab".repeat(32),
            trust_score: score,
            created_at: ts("2025-03-01T12:00:00Z"),
        }
    }

    #[test]
    fn identities_table_has_header_and_rows() {
        let now = ts("2025-03-01T12:05:00Z");
        let table = identities_table(&[identity(1, 80.0), identity(2, 40.0)], now);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[2].contains("80.0 [high]"));
        assert!(lines[3].contains("40.0 [low]"));
        assert!(lines[2].contains("5m 0s ago"));
    }

    #[test]
    fn empty_lists_render_placeholders() {
        let now = Timestamp::now();
        assert_eq!(identities_table(&[], now), "(no identities)");
        assert_eq!(verifications_table(&[], now), "(no verifications)");
        assert_eq!(checks_table(&[], now), "(no consistency checks)");
    }

    #[test]
    fn verification_without_snapshot_score_renders_dash() {
        let now = ts("2025-03-01T12:00:00Z");
        let v = Verification {
            verification_id: 1,
            anchor_id: AnchorId(1),
            platform_name: "github".into(),
            profile_url: "https://github.com/example".into(),
            verification_token: None,
            verified_at: ts("2025-03-01T11:00:00Z"),
            trust_score: None,
        };
        let table = verifications_table(&[v], now);
        let last = table.lines().last().unwrap();
        assert!(last.trim_end().ends_with('-'));
    }

    #[test]
    fn detail_block_caps_events_at_five() {
        let now = ts("2025-03-01T12:00:00Z");
        let events: Vec<ReputationEvent> = (0..8)
            .map(|i| ReputationEvent {
                event_id: i,
                anchor_id: AnchorId(1),
                event_type: "successful_verification".into(),
                platform: Some("github".into()),
                score_impact: Some(5.0),
                time_stamp: ts("2025-03-01T11:00:00Z"),
            })
            .collect();
        let details = IdentityDetails {
            identity: identity(1, 55.0),
            verifications: Vec::new(),
            events,
        };
        let block = details_block(&details, now);
        assert!(block.contains("Events (8)"));
        let numbered = block.lines().filter(|l| l.contains("on github")).count();
        assert_eq!(numbered, 5);
    }

    #[test]
    fn control_characters_cannot_break_rows() {
        let now = ts("2025-03-01T12:00:00Z");
        let mut bad = identity(1, 50.0);
        bad.user_pub_key = "evil\nkey\twith\rcontrols".into();
        let table = identities_table(&[bad], now);
        assert_eq!(table.lines().count(), 3);
    }
}
