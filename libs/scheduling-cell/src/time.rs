// libs/scheduling-cell/src/time.rs
//
// Time arithmetic for schedule overlap checks. Comparisons run on absolute
// minutes (days since epoch x 1440 + minutes of day) so intervals that span
// midnight or different calendar dates compare correctly.
use chrono::NaiveDate;

const MINUTES_PER_DAY: i64 = 1440;

/// Parses a 24-hour `HH:MM` string into minutes since midnight. Rejects
/// non-numeric and out-of-range components instead of wrapping.
pub fn time_to_minutes(time: &str) -> Option<i64> {
    let (hours_part, minutes_part) = time.split_once(':')?;
    let hours: i64 = hours_part.trim().parse().ok()?;
    let minutes: i64 = minutes_part.trim().parse().ok()?;

    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }

    Some(hours * 60 + minutes)
}

/// Zero-padded 24-hour formatting of minutes-of-day.
pub fn minutes_to_time(total_minutes: i64) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Adds minutes to an `HH:MM` string for display of an appointment's end
/// time. Does not wrap at midnight: an end past 24:00 renders with the raw
/// hour count (e.g. `24:30`). Only overlap math, which runs on absolute
/// minutes, is midnight-correct.
pub fn add_minutes_to_time(time: &str, delta_minutes: i64) -> Option<String> {
    let total = time_to_minutes(time)? + delta_minutes;
    Some(minutes_to_time(total))
}

/// 24-hour `HH:MM` to `h:mm AM/PM`, for user-facing messages only.
pub fn format_time_for_display(time: &str) -> Option<String> {
    let total = time_to_minutes(time)?;
    let hours = total / 60;
    let minutes = total % 60;

    let (display_hours, period) = match hours {
        0 => (12, "AM"),
        1..=11 => (hours, "AM"),
        12 => (12, "PM"),
        _ => (hours - 12, "PM"),
    };

    Some(format!("{}:{:02} {}", display_hours, minutes, period))
}

/// Canonical representation for overlap comparisons: days since the Unix
/// epoch times 1440, plus minutes of day. `date` is `YYYY-MM-DD`.
pub fn date_time_to_absolute_minutes(date: &str, time: &str) -> Option<i64> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    let days = day.signed_duration_since(epoch).num_days();

    Some(days * MINUTES_PER_DAY + time_to_minutes(time)?)
}
