//! Display formatting helpers for timestamps.

use chrono::{DateTime, Utc};

/// Formats a creation timestamp relative to `now` ("4 minutes ago").
/// Timestamps from the future (clock skew) collapse to "just now".
pub fn format_time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - created_at).num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 30 {
        return plural(days, "day");
    }

    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }

    plural(months / 12, "year")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs_before_now: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        (now - chrono::Duration::seconds(secs_before_now), now)
    }

    #[test]
    fn under_a_minute_is_just_now() {
        let (t, now) = at(42);
        assert_eq!(format_time_ago(t, now), "just now");
    }

    #[test]
    fn future_timestamp_is_just_now() {
        let (t, now) = at(-30);
        assert_eq!(format_time_ago(t, now), "just now");
    }

    #[test]
    fn minutes_singular_and_plural() {
        let (t, now) = at(60);
        assert_eq!(format_time_ago(t, now), "1 minute ago");
        let (t, now) = at(5 * 60);
        assert_eq!(format_time_ago(t, now), "5 minutes ago");
    }

    #[test]
    fn hours_and_days() {
        let (t, now) = at(3 * 3600);
        assert_eq!(format_time_ago(t, now), "3 hours ago");
        let (t, now) = at(2 * 86_400);
        assert_eq!(format_time_ago(t, now), "2 days ago");
    }

    #[test]
    fn months_and_years() {
        let (t, now) = at(45 * 86_400);
        assert_eq!(format_time_ago(t, now), "1 month ago");
        let (t, now) = at(800 * 86_400);
        assert_eq!(format_time_ago(t, now), "2 years ago");
    }
}
