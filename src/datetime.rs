//! Incident date and time recovery from narrative alert text

use crate::config::{MONTH_NAMES, month_number};
use crate::time::parse_time_token;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// Time token: `H:MM` with optional meridiem, or 3-4 military digits
const TIME_TOKEN: &str = r"([0-9]{1,2}:[0-9]{2}(?:\s*[ap]\.?m\.?)?|[0-9]{3,4})\b";

/// Optional hedge word before the time
const HEDGE: &str = r"(?:(?:approximately|about)\s+)?";

/// `On 3/14/24, at approximately 2130 hours`
static NUMERIC_GRAMMAR: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bOn\s+([0-9]{{1,2}})/([0-9]{{1,2}})/([0-9]{{4}}|[0-9]{{2}})\b,?\s+at\s+{HEDGE}{TIME_TOKEN}(?:\s*hours)?"
    ))
    .unwrap()
});

/// `On March 2nd, 2023, at 9:30 pm`; year and time optional
static MONTH_NAME_GRAMMAR: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    let mut names: Vec<&str> = MONTH_NAMES.iter().map(|(name, _)| *name).collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));
    Regex::new(&format!(
        r"(?i)\bOn\s+({})\b\.?\s+([0-9]{{1,2}})(?:st|nd|rd|th)?\b(?:,\s*([0-9]{{4}})\b)?,?(?:\s+at\s+{HEDGE}{TIME_TOKEN}(?:\s*hours)?)?",
        names.join("|")
    ))
    .unwrap()
});

/// Date and time recovered by one grammar
type DateTimeMatch = (Option<NaiveDate>, Option<NaiveTime>);

/// A grammar reports `None` only when its pattern does not match at all
type Grammar = fn(&str, Option<NaiveDateTime>) -> Option<DateTimeMatch>;

const GRAMMARS: &[Grammar] = &[numeric_date, month_name_date];

/// Extract the incident date and time from alert body text.
///
/// The numeric `M/D/YY` grammar is tried before the month-name grammar; the
/// first grammar whose pattern matches decides both fields, even when one of
/// them fails to parse. `reference` supplies the year when the text omits it,
/// falling back to today's date.
#[must_use]
pub fn extract_incident_datetime(
    text: &str,
    reference: Option<NaiveDateTime>,
) -> (Option<NaiveDate>, Option<NaiveTime>) {
    GRAMMARS
        .iter()
        .find_map(|grammar| grammar(text, reference))
        .unwrap_or((None, None))
}

/// Grammar A: `On <M>/<D>/<YY>[,] at [approximately|about] <TIME>[ hours]`
#[must_use]
pub fn numeric_date(text: &str, _reference: Option<NaiveDateTime>) -> Option<DateTimeMatch> {
    let caps = NUMERIC_GRAMMAR.captures(text)?;

    let date = numeric_calendar_date(&caps[1], &caps[2], &caps[3]);
    let time = parse_time_token(&caps[4]);

    Some((date, time))
}

/// Grammar B: `On <MonthName> <Day>[st|nd|rd|th][, <Year>][,] [at [approximately|about] <TIME>[ hours]]`
#[must_use]
pub fn month_name_date(text: &str, reference: Option<NaiveDateTime>) -> Option<DateTimeMatch> {
    let caps = MONTH_NAME_GRAMMAR.captures(text)?;

    let year = caps.get(3).map(|y| y.as_str());
    let date = named_calendar_date(&caps[1], &caps[2], year, reference);
    let time = caps.get(4).and_then(|t| parse_time_token(t.as_str()));

    Some((date, time))
}

fn numeric_calendar_date(month: &str, day: &str, year: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(expand_year(year)?, month.parse().ok()?, day.parse().ok()?)
}

fn named_calendar_date(
    month: &str,
    day: &str,
    year: Option<&str>,
    reference: Option<NaiveDateTime>,
) -> Option<NaiveDate> {
    let year = match year {
        Some(year) => year.parse().ok()?,
        None => reference.map_or_else(|| Local::now().year(), |r| r.year()),
    };
    NaiveDate::from_ymd_opt(year, month_number(month)?, day.parse().ok()?)
}

/// Two-digit years pivot at 70: `00..=69` are 2000s, `70..=99` are 1900s
fn expand_year(digits: &str) -> Option<i32> {
    let value: i32 = digits.parse().ok()?;
    Some(match digits.len() {
        2 if value < 70 => 2000 + value,
        2 => 1900 + value,
        _ => value,
    })
}
