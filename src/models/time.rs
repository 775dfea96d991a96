//! Minute-of-day arithmetic and `HH:MM` formatting.
//!
//! All times in this crate are minutes since midnight of the lesson day.
//! Durations are minutes as well.

/// Minutes since midnight (or a duration in minutes).
pub type Minute = i64;

/// Start of the fallback interval (09:00).
pub const DEFAULT_START: Minute = 9 * 60;

/// End of the fallback interval (17:00).
pub const DEFAULT_END: Minute = 17 * 60;

/// Length of a day; no duration or setting may exceed it.
pub const MINUTES_PER_DAY: Minute = 24 * 60;

/// Parses `"HH:MM"` into minutes since midnight.
///
/// Accepts `00:00` through `24:00`. Returns `None` for anything else.
///
/// # Examples
/// ```
/// use u_timetable::models::parse_time;
///
/// assert_eq!(parse_time("09:30"), Some(570));
/// assert_eq!(parse_time("9:5"), Some(545));
/// assert_eq!(parse_time("noon"), None);
/// ```
pub fn parse_time(text: &str) -> Option<Minute> {
    let (hours, minutes) = text.trim().split_once(':')?;
    let hours: Minute = hours.trim().parse().ok()?;
    let minutes: Minute = minutes.trim().parse().ok()?;

    if !(0..60).contains(&minutes) || !(0..=24).contains(&hours) {
        return None;
    }
    if hours == 24 && minutes != 0 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Formats minutes since midnight as zero-padded `"HH:MM"`.
pub fn format_time(minutes: Minute) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses a `[start, end]` pair of bounds.
///
/// Malformed bounds (unparseable, or end not after start) yield the
/// 09:00–17:00 fallback. The caller decides what fewer than two bounds mean.
pub fn parse_bounds(start: &str, end: &str) -> (Minute, Minute) {
    match (parse_time(start), parse_time(end)) {
        (Some(s), Some(e)) if e > s => (s, e),
        _ => (DEFAULT_START, DEFAULT_END),
    }
}
