//! Incident location recovery from the alert body

use regex::Regex;

static LABELED_LINE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)^(?:location|area|campus)[:\-]\s*(.+)$").unwrap()
});

/// Narrative clauses, most specific first
static NARRATIVE_CLAUSES: std::sync::LazyLock<[Regex; 3]> = std::sync::LazyLock::new(|| {
    [
        Regex::new(r"(?i)occurred\s+in\s+the\s+area\s+of\s+([^.]+?)\s*\.").unwrap(),
        Regex::new(r"(?i)occurred\s+at\s+([^.]+?)\s*\.").unwrap(),
        Regex::new(r"(?i)occurred\s+near\s+([^.]+?)\s*\.").unwrap(),
    ]
});

type LocationStrategy = fn(&str) -> Option<String>;

const STRATEGIES: &[LocationStrategy] = &[labeled_location, narrative_location];

/// Extract the incident location from decoded body text.
///
/// A `Location:`/`Area:`/`Campus:` line wins over any narrative clause.
#[must_use]
pub fn extract_location(text: &str) -> Option<String> {
    STRATEGIES.iter().find_map(|strategy| strategy(text))
}

/// First labeled line, trailing period removed
#[must_use]
pub fn labeled_location(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let caps = LABELED_LINE.captures(line.trim())?;
        let value = caps[1].trim();
        let value = value.strip_suffix('.').unwrap_or(value).trim_end();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// First narrative clause in priority order, searched across the whole text
#[must_use]
pub fn narrative_location(text: &str) -> Option<String> {
    NARRATIVE_CLAUSES.iter().find_map(|clause| {
        let caps = clause.captures(text)?;
        let value = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
        (!value.is_empty()).then_some(value)
    })
}
