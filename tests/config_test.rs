use chrono::NaiveDate;
use warnme_extract::*;

#[test]
fn test_default_filter() {
    let filter = AlertFilter::default();
    assert_eq!(filter.sender, WARNME_SENDER);
    assert!(filter.should_skip("UC Berkeley WarnMe: Community Advisory"));
    assert!(filter.should_skip("CRITICAL ALERT: shelter in place"));
    assert!(!filter.should_skip(
        "UC Berkeley WarnMe: Robbery Reported. Some May Find the Content Upsetting."
    ));
}

#[test]
fn test_filter_from_json_keeps_defaults() {
    let filter = AlertFilter::from_json(r#"{"skip_markers": ["Test Message"]}"#).unwrap();
    assert_eq!(filter.sender, WARNME_SENDER);
    assert!(filter.should_skip("WarnMe Test Message"));
    assert!(!filter.should_skip("Community Advisory"));
}

#[test]
fn test_filter_from_bad_json() {
    assert!(matches!(
        AlertFilter::from_json("[1, 2"),
        Err(ExtractError::Json(_))
    ));
}

#[test]
fn test_is_from_sender() {
    let filter = AlertFilter::default();
    assert!(filter.is_from_sender("UC Berkeley WarnMe <UCBerkeley@warnme.berkeley.edu>"));
    assert!(filter.is_from_sender(" ucberkeley@warnme.berkeley.edu "));
    assert!(!filter.is_from_sender("someone@example.com"));
}

#[test]
fn test_mailbox_query() {
    let filter = AlertFilter::default();
    assert_eq!(
        filter.mailbox_query(None, None),
        "from:ucberkeley@warnme.berkeley.edu"
    );
    assert_eq!(
        filter.mailbox_query(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 2, 15)
        ),
        "from:ucberkeley@warnme.berkeley.edu after:2024/01/01 before:2024/02/15"
    );
}

#[test]
fn test_month_table_covers_every_month() {
    for month in 1..=12 {
        assert!(MONTH_NAMES.iter().any(|(_, m)| *m == month));
    }
}
