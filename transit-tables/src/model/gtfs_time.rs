//! GTFS schedule times are written `H:MM:SS` relative to the start of the
//! service day and may exceed 24 hours for trips running past midnight, so they
//! are kept as strings and only parsed for ordering.

/// parses a GTFS `H:MM:SS` time into seconds since the start of the service day.
/// returns `None` for empty or malformed values.
pub fn parse_seconds(time: &str) -> Option<u32> {
    let mut parts = time.trim().split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    let seconds: u32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }
    hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)
}
