//! Fixed constants of the WarnMe domain and the caller-side alert filter

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Address every WarnMe notification is sent from
pub const WARNME_SENDER: &str = "ucberkeley@warnme.berkeley.edu";

/// Sentence closing every crime-alert subject line
pub const UPSETTING_CONTENT_NOTICE: &str = "Some May Find the Content Upsetting.";

/// Recognized month spellings, lowercase and without a trailing period.
pub const MONTH_NAMES: &[(&str, u32)] = &[
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

/// Look up a month name or abbreviation, ignoring case and a trailing period
#[must_use]
pub fn month_number(name: &str) -> Option<u32> {
    let key = name.trim().trim_end_matches('.').to_lowercase();
    MONTH_NAMES
        .iter()
        .find(|(spelling, _)| *spelling == key)
        .map(|(_, month)| *month)
}

/// Which messages a caller feeds into extraction.
///
/// The extractors never consult this; it exists so fetchers share one policy
/// for the sender address and the advisory subjects that carry no incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertFilter {
    /// Expected sender address
    pub sender: String,

    /// Subject fragments marking messages to skip
    pub skip_markers: Vec<String>,
}

impl Default for AlertFilter {
    fn default() -> Self {
        Self {
            sender: WARNME_SENDER.to_string(),
            skip_markers: vec!["Community Advisory".into(), "Critical Alert".into()],
        }
    }
}

impl AlertFilter {
    /// Load a filter from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when the subject names an alert kind the caller ignores
    #[must_use]
    pub fn should_skip(&self, subject: &str) -> bool {
        let lower = subject.to_lowercase();
        self.skip_markers
            .iter()
            .any(|marker| lower.contains(&marker.to_lowercase()))
    }

    /// Compare a `From` header value against the configured sender
    #[must_use]
    pub fn is_from_sender(&self, from: &str) -> bool {
        let address = match (from.find('<'), from.rfind('>')) {
            (Some(start), Some(end)) if start < end => &from[start + 1..end],
            _ => from,
        };
        address.trim().eq_ignore_ascii_case(&self.sender)
    }

    /// Mailbox search string selecting this sender within an optional date window.
    ///
    /// `until` is exclusive, matching the mailbox `before:` operator.
    #[must_use]
    pub fn mailbox_query(&self, since: Option<NaiveDate>, until: Option<NaiveDate>) -> String {
        let mut parts = vec![format!("from:{}", self.sender)];
        if let Some(since) = since {
            parts.push(format!("after:{}", since.format("%Y/%m/%d")));
        }
        if let Some(until) = until {
            parts.push(format!("before:{}", until.format("%Y/%m/%d")));
        }
        parts.join(" ")
    }
}
