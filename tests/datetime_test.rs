use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use warnme_extract::*;

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn time(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

fn reference(s: &str) -> Option<NaiveDateTime> {
    Some(NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap())
}

// --- Numeric grammar ---

#[test]
fn test_numeric_military_time() {
    let text = "On 3/14/24, at approximately 2130 hours, a robbery occurred near Sather Gate.";
    assert_eq!(
        extract_incident_datetime(text, None),
        (date(2024, 3, 14), time(21, 30))
    );
}

#[test]
fn test_numeric_meridiem_without_comma() {
    let text = "On 11/02/23 at about 9:05 p.m. the victim was approached.";
    assert_eq!(
        extract_incident_datetime(text, None),
        (date(2023, 11, 2), time(21, 5))
    );
}

#[test]
fn test_numeric_four_digit_year() {
    let text = "On 1/5/2025 at 0715 hours a theft was reported.";
    assert_eq!(
        extract_incident_datetime(text, None),
        (date(2025, 1, 5), time(7, 15))
    );
}

#[test]
fn test_numeric_invalid_date_keeps_time() {
    let text = "On 2/30/24, at approximately 1800 hours, a burglary occurred.";
    assert_eq!(extract_incident_datetime(text, None), (None, time(18, 0)));
}

#[test]
fn test_numeric_invalid_time_keeps_date() {
    let text = "On 2/3/24, at 2575 hours, a burglary occurred.";
    assert_eq!(extract_incident_datetime(text, None), (date(2024, 2, 3), None));
}

#[test]
fn test_numeric_wins_over_month_name() {
    let text = "On March 1st at 10:00 am a suspect was seen. On 3/2/24 at 1100 hours the robbery occurred.";
    assert_eq!(
        extract_incident_datetime(text, None),
        (date(2024, 3, 2), time(11, 0))
    );
}

#[test]
fn test_numeric_requires_time() {
    assert!(numeric_date("On 3/14/24 a robbery occurred.", None).is_none());
}

// --- Month-name grammar ---

#[test]
fn test_month_name_uses_reference_year() {
    let text = "On March 2nd at 9:30 pm, a student was robbed.";
    let (d, t) = extract_incident_datetime(text, reference("2023-03-05T10:00:00"));
    assert_eq!(d, date(2023, 3, 2));
    assert_eq!(t, time(21, 30));
}

#[test]
fn test_month_name_explicit_year() {
    let text = "On September 21st, 2022, at approximately 2245 hours, an assault occurred.";
    assert_eq!(
        extract_incident_datetime(text, reference("2024-01-01T00:00:00")),
        (date(2022, 9, 21), time(22, 45))
    );
}

#[test]
fn test_month_abbreviation_with_period() {
    let text = "On Jan. 4 at about 7:10 am the vehicle was broken into.";
    assert_eq!(
        extract_incident_datetime(text, reference("2024-01-06T08:00:00")),
        (date(2024, 1, 4), time(7, 10))
    );
}

#[test]
fn test_month_abbreviation_sept() {
    let text = "on sept 9th, 2021 at 1:05 PM a theft occurred.";
    assert_eq!(
        extract_incident_datetime(text, None),
        (date(2021, 9, 9), time(13, 5))
    );
}

#[test]
fn test_month_name_without_time() {
    let text = "On October 3rd, 2024, a bicycle was stolen from the rack.";
    assert_eq!(
        extract_incident_datetime(text, None),
        (date(2024, 10, 3), None)
    );
}

#[test]
fn test_month_name_without_year_or_reference() {
    let text = "On May 7 at 1400 hours a fight occurred.";
    let (d, t) = extract_incident_datetime(text, None);
    assert_eq!(d, date(Local::now().year(), 5, 7));
    assert_eq!(t, time(14, 0));
}

#[test]
fn test_month_name_invalid_day() {
    let text = "On February 31st, 2024, at 2:00 pm a robbery occurred.";
    assert_eq!(extract_incident_datetime(text, None), (None, time(14, 0)));
}

#[test]
fn test_unknown_month_word() {
    assert!(month_name_date("On Monday 5 at 2:00 pm", None).is_none());
}

#[test]
fn test_no_date_phrase() {
    let text = "Police are investigating a robbery near campus.";
    assert_eq!(extract_incident_datetime(text, None), (None, None));
}

#[test]
fn test_month_number_lookup() {
    assert_eq!(month_number("Sept."), Some(9));
    assert_eq!(month_number("DECEMBER"), Some(12));
    assert_eq!(month_number("Smarch"), None);
}

#[test]
fn test_numeric_colon_time_without_meridiem() {
    let text = "On 3/14/24 at 21:30 a robbery occurred near Sather Gate.";
    assert_eq!(
        extract_incident_datetime(text, None),
        (date(2024, 3, 14), time(21, 30))
    );
}

// --- Non-ASCII digits ---

#[test]
fn test_fullwidth_time_digits_do_not_match() {
    let text = "On 3/14/24, at approximately ２１３０ hours, a robbery occurred.";
    assert_eq!(extract_incident_datetime(text, None), (None, None));
}

#[test]
fn test_fullwidth_date_digits_do_not_match() {
    let text = "On March ２nd at 9:30 pm, a student was robbed.";
    assert!(month_name_date(text, None).is_none());
    assert!(numeric_date("On ３/１４/２４ at 2130 hours", None).is_none());
}
