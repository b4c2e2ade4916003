//! Assembly of incident records from whole messages

use crate::body::decode_body;
use crate::category::extract_category;
use crate::datetime::extract_incident_datetime;
use crate::error::Result;
use crate::location::extract_location;
use crate::types::{IncidentRecord, Message, MessageSummary};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A message summary together with the incident extracted from it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedAlert {
    pub summary: MessageSummary,
    pub record: IncidentRecord,
}

/// Run all four extractors over a message.
///
/// Each field is extracted independently; a miss leaves that field `None`.
#[must_use]
pub fn extract_record(message: &Message) -> IncidentRecord {
    let summary = MessageSummary::from_message(message);
    record_for(message, &summary)
}

fn record_for(message: &Message, summary: &MessageSummary) -> IncidentRecord {
    let text = decode_body(&message.payload, message.snippet.as_deref());
    let (incident_date, incident_time) =
        extract_incident_datetime(&text, summary.reference_timestamp());

    IncidentRecord {
        category: summary.subject.as_deref().and_then(extract_category),
        location: extract_location(&text),
        incident_date,
        incident_time,
    }
}

/// Summarize a message and extract its incident
#[must_use]
pub fn parse_alert(message: &Message) -> ParsedAlert {
    let summary = MessageSummary::from_message(message);
    let record = record_for(message, &summary);

    debug!(
        "Parsed alert {}: {}",
        summary.id,
        summary.subject.as_deref().unwrap_or("(no subject)")
    );

    ParsedAlert { summary, record }
}

/// Parse a raw RFC 5322 alert, e.g. a saved `.eml` file
pub fn parse_alert_mime(id: &str, raw: &[u8]) -> Result<ParsedAlert> {
    let message = Message::from_mime(id, raw)?;
    Ok(parse_alert(&message))
}
