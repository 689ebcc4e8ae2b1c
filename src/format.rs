//! Display and parsing helpers for player statistics.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use itertools::Itertools;

const AVATAR_BASE_URL: &str = "https://vzge.me/full";
const STATS_ROUTE: &str = "stats";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a playtime given in minutes, e.g. `207h 25m` or `42m`.
pub fn pretty_playtime(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours == 0 {
        format!("{minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// Render a duration the way parkour times are shown: `1m 45s`, `45.3s`,
/// `1h 2m 3s`. Zero units are skipped except for a bare `0s`.
pub fn pretty_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    let millis = duration.subsec_millis();

    let seconds = if millis == 0 {
        format!("{secs}s")
    } else {
        let fraction = format!("{millis:03}");
        format!("{secs}.{}s", fraction.trim_end_matches('0'))
    };

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if secs > 0 || millis > 0 || parts.is_empty() {
        parts.push(seconds);
    }
    parts.into_iter().join(" ")
}

/// Parse a duration written as unit-suffixed parts (`1h 2m 3s`, `1m 45s`,
/// `45.3s`, `250ms`) or clock style (`1:45`, `1:02:03.5`).
///
/// Returns `None` for anything unparseable, including totals that overflow
/// a [`Duration`].
pub fn parse_pretty_duration(text: &str) -> Option<Duration> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.contains(':') {
        return parse_clock_duration(text);
    }

    let mut total = Duration::ZERO;
    for part in text.split_whitespace() {
        let split = part.find(|c: char| c.is_ascii_alphabetic())?;
        let (value, unit) = part.split_at(split);
        let value: f64 = value.parse().ok()?;
        let seconds = match unit {
            "h" => value * 3600.0,
            "m" => value * 60.0,
            "s" => value,
            "ms" => value / 1000.0,
            _ => return None,
        };
        total = total.checked_add(Duration::try_from_secs_f64(seconds).ok()?)?;
    }
    Some(total)
}

fn parse_clock_duration(text: &str) -> Option<Duration> {
    let parts = text.split(':').collect_vec();
    if parts.len() > 3 {
        return None;
    }
    let (seconds, whole) = parts.split_last()?;
    let seconds: f64 = seconds.parse().ok()?;
    let mut total = Duration::try_from_secs_f64(seconds).ok()?;
    for (unit, value) in whole.iter().rev().enumerate() {
        let value: u64 = value.parse().ok()?;
        let secs = value.checked_mul(60u64.checked_pow(unit as u32 + 1)?)?;
        total = total.checked_add(Duration::from_secs(secs))?;
    }
    Some(total)
}

/// Parse the timestamp formats the player-data API has been seen to use:
/// RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC), or a bare date (midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Long-form date such as `March 5, 2025`.
pub fn long_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y").to_string()
}

pub fn avatar_url(username: &str, size: u32) -> String {
    format!("{AVATAR_BASE_URL}/{size}/{username}.png")
}

/// Extract the username from a `/stats/<name>` page path.
///
/// Returns `None` for the bare `/stats` route. Query strings and fragments
/// are ignored.
pub fn username_from_path(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && *segment != STATS_ROUTE)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_pretty_playtime() {
        assert_eq!(pretty_playtime(12445), "207h 25m");
        assert_eq!(pretty_playtime(120), "2h 0m");
        assert_eq!(pretty_playtime(59), "59m");
        assert_eq!(pretty_playtime(0), "0m");
    }

    #[test]
    fn test_pretty_duration() {
        assert_eq!(pretty_duration(Duration::from_secs(105)), "1m 45s");
        assert_eq!(pretty_duration(Duration::from_millis(45_300)), "45.3s");
        assert_eq!(pretty_duration(Duration::from_secs(3723)), "1h 2m 3s");
        assert_eq!(pretty_duration(Duration::from_secs(120)), "2m");
        assert_eq!(pretty_duration(Duration::ZERO), "0s");
    }

    #[test]
    fn test_parse_pretty_duration() {
        assert_eq!(
            parse_pretty_duration("1m 45s"),
            Some(Duration::from_secs(105))
        );
        assert_eq!(
            parse_pretty_duration("45.5s"),
            Some(Duration::from_millis(45_500))
        );
        assert_eq!(
            parse_pretty_duration("1h 2m 3s"),
            Some(Duration::from_secs(3723))
        );
        assert_eq!(
            parse_pretty_duration("250ms"),
            Some(Duration::from_millis(250))
        );
        assert_eq!(
            parse_pretty_duration("1:45"),
            Some(Duration::from_secs(105))
        );
        assert_eq!(
            parse_pretty_duration("1:02:03"),
            Some(Duration::from_secs(3723))
        );
        assert_eq!(parse_pretty_duration(""), None);
        assert_eq!(parse_pretty_duration("fast"), None);
        assert_eq!(parse_pretty_duration("3 laps"), None);
    }

    #[test]
    fn test_parse_pretty_duration_overflow() {
        assert_eq!(parse_pretty_duration("307445734561825861:00"), None);
        assert_eq!(parse_pretty_duration("99999999999999999999:00:00"), None);
        assert_eq!(
            parse_pretty_duration("4000000000000000h 4000000000000000h"),
            None
        );
        assert_eq!(parse_pretty_duration("1e300s"), None);
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 5, 18, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-05T18:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-05T19:30:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-05 18:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2023-08-15"),
            Some(Utc.with_ymd_and_hms(2023, 8, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_long_date() {
        let date = Utc.with_ymd_and_hms(2025, 3, 5, 18, 30, 0).unwrap();
        assert_eq!(long_date(&date), "March 5, 2025");
    }

    #[test]
    fn test_username_from_path() {
        assert_eq!(username_from_path("/stats/Notch"), Some("Notch"));
        assert_eq!(username_from_path("/stats/Notch/"), Some("Notch"));
        assert_eq!(username_from_path("/stats/Notch?tab=bedwars"), Some("Notch"));
        assert_eq!(username_from_path("/stats"), None);
        assert_eq!(username_from_path("/stats/"), None);
        assert_eq!(username_from_path(""), None);
    }

    #[test]
    fn test_avatar_url() {
        assert_eq!(
            avatar_url("Notch", 400),
            "https://vzge.me/full/400/Notch.png"
        );
    }
}
