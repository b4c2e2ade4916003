//! Core types for alert messages and incident records

use crate::error::{ExtractError, Result};
use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a part's body blob is encoded on the wire
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlobEncoding {
    /// URL-safe base64, as delivered by the mailbox API
    #[default]
    Base64Url,
    QuotedPrintable,
    /// Already decoded text
    Identity,
}

/// A single message header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Body blob of one payload part
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartBody {
    /// Encoded content, absent for container parts
    #[serde(default)]
    pub data: Option<String>,

    /// Size in bytes reported by the source
    #[serde(default)]
    pub size: u64,
}

/// One node of a message's MIME tree
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawPayload {
    /// MIME type, e.g. `text/plain`
    #[serde(default)]
    pub mime_type: String,

    #[serde(default)]
    pub headers: Vec<Header>,

    #[serde(default)]
    pub body: Option<PartBody>,

    /// Child parts; a node with children ignores its own body
    #[serde(default)]
    pub parts: Vec<Self>,

    #[serde(default)]
    pub encoding: BlobEncoding,
}

impl RawPayload {
    /// Leaf part carrying already-decoded text
    #[must_use]
    pub fn text(mime_type: &str, text: &str) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            body: Some(PartBody {
                data: Some(text.to_string()),
                size: text.len() as u64,
            }),
            encoding: BlobEncoding::Identity,
            ..Self::default()
        }
    }

    /// Leaf part carrying base64url data
    #[must_use]
    pub fn encoded(mime_type: &str, content: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            body: Some(PartBody {
                data: Some(URL_SAFE.encode(content)),
                size: content.len() as u64,
            }),
            ..Self::default()
        }
    }

    /// Container part
    #[must_use]
    pub fn multipart(mime_type: &str, parts: Vec<Self>) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            parts,
            ..Self::default()
        }
    }

    /// Case-insensitive header lookup, first occurrence wins
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Leaf parts in depth-first order
    #[must_use]
    pub fn leaves(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    /// Non-empty encoded body of this part, if any
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.data.as_deref())
            .filter(|d| !d.is_empty())
    }

    /// Build a payload tree from a raw RFC 5322 message
    pub fn from_mime(raw: &[u8]) -> Result<Self> {
        let parsed =
            mailparse::parse_mail(raw).map_err(|e| ExtractError::Structure(e.to_string()))?;
        Ok(convert_mail(&parsed))
    }
}

fn collect_leaves<'a>(part: &'a RawPayload, out: &mut Vec<&'a RawPayload>) {
    if part.parts.is_empty() {
        out.push(part);
    } else {
        for child in &part.parts {
            collect_leaves(child, out);
        }
    }
}

fn convert_mail(parsed: &mailparse::ParsedMail) -> RawPayload {
    let headers = parsed
        .headers
        .iter()
        .map(|h| Header {
            name: h.get_key(),
            value: h.get_value(),
        })
        .collect();

    if parsed.subparts.is_empty() {
        // mailparse undoes the transfer encoding and charset for us
        let body = parsed.get_body().ok().map(|text| PartBody {
            size: text.len() as u64,
            data: Some(text),
        });
        RawPayload {
            mime_type: parsed.ctype.mimetype.to_lowercase(),
            headers,
            body,
            parts: Vec::new(),
            encoding: BlobEncoding::Identity,
        }
    } else {
        RawPayload {
            mime_type: parsed.ctype.mimetype.to_lowercase(),
            headers,
            body: None,
            parts: parsed.subparts.iter().map(convert_mail).collect(),
            encoding: BlobEncoding::Identity,
        }
    }
}

/// A mailbox message resource
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub thread_id: Option<String>,

    /// Short preview text supplied by the mailbox
    #[serde(default)]
    pub snippet: Option<String>,

    #[serde(default)]
    pub payload: RawPayload,

    /// Receive time in epoch milliseconds, sent as a decimal string
    #[serde(default)]
    pub internal_date: Option<String>,

    #[serde(default)]
    pub size_estimate: Option<u64>,

    /// Whole message as base64url RFC 5322 bytes (raw format only)
    #[serde(default)]
    pub raw: Option<String>,
}

impl Message {
    /// Parse a message resource from its JSON form.
    ///
    /// Raw-format resources have their `raw` field expanded into `payload`.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut message: Self = serde_json::from_str(json)?;
        if message.payload.parts.is_empty()
            && message.payload.body.is_none()
            && let Some(raw) = message.raw.as_deref()
        {
            message.payload = RawPayload::from_mime(&decode_base64url(raw)?)?;
        }
        Ok(message)
    }

    /// Build a message from a base64url-encoded RFC 5322 blob
    pub fn from_raw(id: impl Into<String>, raw: &str) -> Result<Self> {
        let bytes = decode_base64url(raw)?;
        let mut message = Self::from_mime(id, &bytes)?;
        message.raw = Some(raw.to_string());
        Ok(message)
    }

    /// Build a message from raw RFC 5322 bytes, e.g. a saved `.eml` file
    pub fn from_mime(id: impl Into<String>, raw: &[u8]) -> Result<Self> {
        let payload = RawPayload::from_mime(raw)?;
        Ok(Self {
            id: id.into(),
            size_estimate: Some(raw.len() as u64),
            payload,
            ..Self::default()
        })
    }

    /// Subject header of the top-level payload
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.payload.header("subject")
    }
}

/// Decode URL-safe base64 with or without padding
pub fn decode_base64url(data: &str) -> Result<Vec<u8>> {
    let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    URL_SAFE_NO_PAD
        .decode(compact.trim_end_matches('='))
        .map_err(|e| ExtractError::Decode(e.to_string()))
}

/// Parse a `Date` header, RFC 2822 first, then RFC 3339
pub fn parse_header_date(value: &str) -> Result<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map_err(|e| ExtractError::InvalidDate(format!("{value}: {e}")))
}

/// Header-level summary of a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageSummary {
    pub id: String,
    pub thread_id: Option<String>,
    pub snippet: Option<String>,
    pub subject: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,

    /// `Date` header as sent
    pub date_raw: Option<String>,

    /// `Date` header, when it parses
    pub date: Option<DateTime<FixedOffset>>,

    pub internal_date: Option<String>,
    pub size_estimate: Option<u64>,
}

impl MessageSummary {
    #[must_use]
    pub fn from_message(message: &Message) -> Self {
        let payload = &message.payload;
        let date_raw = payload.header("date").map(str::to_string);
        let date = date_raw.as_deref().and_then(|d| parse_header_date(d).ok());

        Self {
            id: message.id.clone(),
            thread_id: message.thread_id.clone(),
            snippet: message.snippet.clone(),
            subject: payload.header("subject").map(str::to_string),
            from: payload.header("from").map(str::to_string),
            to: payload.header("to").map(str::to_string),
            date_raw,
            date,
            internal_date: message.internal_date.clone(),
            size_estimate: message.size_estimate,
        }
    }

    /// Timestamp used to resolve a missing incident year.
    ///
    /// The sender's local wall-clock time from the `Date` header, else the
    /// mailbox receive time in UTC.
    #[must_use]
    pub fn reference_timestamp(&self) -> Option<NaiveDateTime> {
        self.date.map(|d| d.naive_local()).or_else(|| {
            self.internal_date
                .as_deref()
                .and_then(|ms| ms.trim().parse::<i64>().ok())
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|d| d.naive_utc())
        })
    }
}

/// Structured incident extracted from one alert
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncidentRecord {
    /// Crime category from the subject line
    pub category: Option<String>,

    pub location: Option<String>,

    pub incident_date: Option<NaiveDate>,

    /// Time of day, serialized as `HH:MM`
    #[serde(default, with = "hhmm")]
    pub incident_time: Option<NaiveTime>,
}

impl IncidentRecord {
    /// True when no field could be extracted
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.location.is_none()
            && self.incident_date.is_none()
            && self.incident_time.is_none()
    }
}

impl fmt::Display for IncidentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .incident_date
            .map_or_else(|| "?".to_string(), |d| d.to_string());
        let time = self
            .incident_time
            .map_or_else(|| "?".to_string(), |t| t.format("%H:%M").to_string());
        write!(
            f,
            "{} | {} {} | {}",
            self.category.as_deref().unwrap_or("?"),
            date,
            time,
            self.location.as_deref().unwrap_or("?")
        )
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                NaiveTime::parse_from_str(&s, "%H:%M")
                    .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}
