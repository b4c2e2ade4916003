//! Time-of-day token normalization

use chrono::{NaiveTime, Timelike};
use regex::Regex;

static MERIDIEM_TIME: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})\s*([ap])\.?m\.?$").unwrap()
});

static COLON_TIME: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").unwrap());

static MILITARY_TIME: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").unwrap());

/// Parse a raw time token into a time of day.
///
/// Accepts `H:MM am|pm` (hour 1-12), `H:MM` read as 24-hour, and 3-4 digit
/// military tokens such as `2130` or `007`. Anything else yields `None`.
#[must_use]
pub fn parse_time_token(raw: &str) -> Option<NaiveTime> {
    let token = raw.trim().to_lowercase();

    if let Some(caps) = MERIDIEM_TIME.captures(&token) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        let hour = match (&caps[3], hour) {
            ("a", 12) => 0,
            ("a", h) | ("p", h @ 12) => h,
            (_, h) => h + 12,
        };
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    if let Some(caps) = COLON_TIME.captures(&token) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    if MILITARY_TIME.is_match(&token) && token.bytes().all(|b| b.is_ascii_digit()) {
        let padded = format!("{token:0>4}");
        let (hour, minute) = padded.split_at(2);
        return NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0);
    }

    None
}

/// Render a time as `H:MM am|pm`
#[must_use]
pub fn format_12h(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    let meridiem = if is_pm { "pm" } else { "am" };
    format!("{hour}:{:02} {meridiem}", time.minute())
}

/// Normalize a time token into (`HH:MM`, `H:MM am|pm`).
///
/// Both halves are `None` when the token does not parse.
#[must_use]
pub fn normalize_time(raw: &str) -> (Option<String>, Option<String>) {
    parse_time_token(raw).map_or((None, None), |time| {
        (
            Some(time.format("%H:%M").to_string()),
            Some(format_12h(time)),
        )
    })
}
