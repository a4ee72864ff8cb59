use chrono::{DateTime, FixedOffset, Utc};

/// Wall-clock offset for human-facing capture stamps. The pipeline's
/// home zone (Guatemala) has no DST, so a fixed UTC-6 offset is exact.
pub const LOCAL_OFFSET_SECS: i32 = 6 * 3600;

pub fn local_offset() -> FixedOffset {
    FixedOffset::west_opt(LOCAL_OFFSET_SECS).unwrap()
}

/// `(date, time)` strings for the given instant in the local zone.
pub fn local_stamp(now: DateTime<Utc>) -> (String, String) {
    let local = now.with_timezone(&local_offset());
    (
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M:%S").to_string(),
    )
}
