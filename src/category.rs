//! Crime category recovery from the alert subject line

use crate::config::UPSETTING_CONTENT_NOTICE;
use regex::Regex;

// "<prefix>: <category>. Some May Find the Content Upsetting."
static SUBJECT_TEMPLATE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\s*[^:\-]+?\s*[:\-]\s*(.+?)\s*\.\s*{}\s*$",
        regex::escape(UPSETTING_CONTENT_NOTICE)
    ))
    .unwrap()
});

static REPORT_WORD: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)\breport(?:ed)?\b").unwrap());

/// Extract the crime category from a WarnMe subject.
///
/// `"UC Berkeley WarnMe: Robbery Reported. Some May Find the Content Upsetting."`
/// yields `Some("Robbery")`. Subjects outside the template yield `None`.
#[must_use]
pub fn extract_category(subject: &str) -> Option<String> {
    let caps = SUBJECT_TEMPLATE.captures(subject)?;
    clean_category(&caps[1])
}

/// Drop the words "Report"/"Reported" and tidy whitespace
#[must_use]
pub fn clean_category(raw: &str) -> Option<String> {
    let stripped = REPORT_WORD.replace_all(raw, " ");
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
