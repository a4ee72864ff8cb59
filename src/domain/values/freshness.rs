use chrono::{DateTime, Utc};

/// Freshness score for a candidate whose capture time is unknown.
/// Conservative: neither fresh nor fully stale.
pub const UNKNOWN_AGE_SCORE: f64 = 20.0;

/// Step function from candidate age in days to a 0–100 freshness score.
/// Non-increasing: older candidates never score higher than newer ones.
pub fn freshness_score(age_days: f64) -> f64 {
    if age_days <= 1.0 {
        100.0
    } else if age_days <= 3.0 {
        80.0
    } else if age_days <= 7.0 {
        60.0
    } else if age_days <= 14.0 {
        40.0
    } else if age_days <= 30.0 {
        20.0
    } else {
        10.0
    }
}

/// Freshness of a capture timestamp relative to `now`.
/// `None` (unparsable or absent capture time) scores [`UNKNOWN_AGE_SCORE`].
pub fn freshness_of(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match created_at {
        Some(ts) => {
            let age_days = (now - ts).num_minutes() as f64 / (60.0 * 24.0);
            freshness_score(age_days.max(0.0))
        }
        None => UNKNOWN_AGE_SCORE,
    }
}
