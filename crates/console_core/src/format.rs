use chrono::{Datelike, Local, TimeZone, Timelike};

use crate::Millis;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Longest duration still shown in minutes; anything above is shown in hours.
pub const MINUTES_DISPLAY_LIMIT: i64 = 60;

/// The backend uses both null and zero for "not set".
fn present(ts: Option<Millis>) -> Option<Millis> {
    ts.filter(|&value| value != 0)
}

/// Formats an epoch-millisecond timestamp in the viewer's local time zone.
///
/// Output looks like `5 Mar 2024 9:7:3`: fields are not zero padded and no
/// zone indicator is included.
pub fn format_timestamp(ts: Option<Millis>) -> Option<String> {
    format_timestamp_in(ts, &Local)
}

/// Same as [`format_timestamp`] but in an explicit time zone.
pub fn format_timestamp_in<Tz: TimeZone>(ts: Option<Millis>, tz: &Tz) -> Option<String> {
    let millis = present(ts)?;
    let dt = tz.timestamp_millis_opt(millis).single()?;
    Some(format!(
        "{} {} {} {}:{}:{}",
        dt.day(),
        MONTHS[dt.month0() as usize],
        dt.year(),
        dt.hour(),
        dt.minute(),
        dt.second()
    ))
}

/// Whole minutes between two timestamps, rounded up. Negative spans clamp to 0.
pub fn duration_minutes(created: Option<Millis>, completed: Option<Millis>) -> Option<i64> {
    let start = present(created)?;
    let end = present(completed)?;
    let delta = end.saturating_sub(start).max(0);
    let partial = i64::from(delta % MILLIS_PER_MINUTE != 0);
    Some(delta / MILLIS_PER_MINUTE + partial)
}

/// Human duration between creation and completion.
///
/// Up to an hour reads as `"<n> min"`, longer spans as whole hours with the
/// fraction truncated (`"1 hrs"` for 61 minutes).
pub fn format_duration(created: Option<Millis>, completed: Option<Millis>) -> Option<String> {
    let minutes = duration_minutes(created, completed)?;
    if minutes <= MINUTES_DISPLAY_LIMIT {
        Some(format!("{minutes} min"))
    } else {
        Some(format!("{} hrs", minutes / 60))
    }
}
