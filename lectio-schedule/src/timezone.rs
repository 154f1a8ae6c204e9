use chrono::{DateTime, FixedOffset, Utc};

/// Build a fixed offset from minutes east of UTC. `None` when the offset
/// reaches a full day in either direction; the narrower UTC-12:00..UTC+14:00
/// business range is enforced where offsets enter the system.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

/// Render an instant as local wall-clock time for a student, e.g. for
/// notification text. Falls back to UTC when the offset is unusable.
pub fn local_display(at: DateTime<Utc>, offset_minutes: i32) -> String {
    match offset_from_minutes(offset_minutes) {
        Some(offset) => at.with_timezone(&offset).format("%Y-%m-%d %H:%M").to_string(),
        None => at.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}
