use warnme_extract::*;

#[test]
fn test_labeled_location_line() {
    let text = "Robbery\nLocation: Oxford Street & Hearst Ave\nSuspect: unknown";
    assert_eq!(
        extract_location(text).as_deref(),
        Some("Oxford Street & Hearst Ave")
    );
}

#[test]
fn test_labeled_line_trailing_period() {
    let text = "  Area- Telegraph Ave near Bancroft Way.  ";
    assert_eq!(
        extract_location(text).as_deref(),
        Some("Telegraph Ave near Bancroft Way")
    );
}

#[test]
fn test_campus_label_case_insensitive() {
    let text = "CAMPUS: Memorial Stadium";
    assert_eq!(extract_location(text).as_deref(), Some("Memorial Stadium"));
}

#[test]
fn test_first_labeled_line_wins() {
    let text = "Location: Sproul Plaza\nArea: Southside";
    assert_eq!(extract_location(text).as_deref(), Some("Sproul Plaza"));
}

#[test]
fn test_labeled_line_beats_narrative() {
    let text = "The robbery occurred near Doe Library.\nLocation: Sather Gate";
    assert_eq!(extract_location(text).as_deref(), Some("Sather Gate"));
}

#[test]
fn test_label_must_start_line() {
    let text = "Reported location: somewhere. It occurred near Memorial Glade.";
    assert_eq!(extract_location(text).as_deref(), Some("Memorial Glade"));
}

#[test]
fn test_narrative_near() {
    let text = "A student reported that the assault occurred near Memorial Glade. Police responded.";
    assert_eq!(extract_location(text).as_deref(), Some("Memorial Glade"));
}

#[test]
fn test_narrative_area_of_preferred_over_at() {
    let text = "The incident occurred at night. The robbery occurred in the area of \
                Bancroft Way and Telegraph Ave.";
    assert_eq!(
        extract_location(text).as_deref(),
        Some("Bancroft Way and Telegraph Ave")
    );
}

#[test]
fn test_narrative_at_preferred_over_near() {
    let text = "It occurred near the gym. It occurred at the Recreational Sports Facility.";
    assert_eq!(
        extract_location(text).as_deref(),
        Some("the Recreational Sports Facility")
    );
}

#[test]
fn test_narrative_across_wrapped_lines() {
    let text = "the victim said the robbery occurred in the area of Hearst Avenue\nand Euclid Avenue. \
                The suspect fled.";
    assert_eq!(
        extract_location(text).as_deref(),
        Some("Hearst Avenue and Euclid Avenue")
    );
}

#[test]
fn test_no_location() {
    assert!(extract_location("No details are available at this time.").is_none());
    assert!(extract_location("").is_none());
}

#[test]
fn test_narrative_without_period() {
    assert!(narrative_location("it occurred near the library").is_none());
}

#[test]
fn test_location_idempotent() {
    let first = extract_location("Location: Oxford Street & Hearst Ave.").unwrap();
    let line = format!("Location: {first}");
    assert_eq!(extract_location(&line).as_deref(), Some(first.as_str()));
}

#[test]
fn test_labeled_location_only() {
    assert!(labeled_location("occurred near Memorial Glade.").is_none());
}
