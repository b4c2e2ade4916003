// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! WarnMe Incident Extractor
//!
//! Turns campus security alert emails into structured incident records:
//! crime category, incident date, incident time and location.
//!
//! # Pipeline
//!
//! - Body decoding of the MIME tree into one plain-text string
//! - Category recovery from the fixed subject template
//! - Location recovery from labeled lines or narrative clauses
//! - Incident date/time recovery from numeric or month-name phrasing
//!
//! Every extractor is a pure function returning `Option`; a field that cannot
//! be recovered is simply absent from the record.
//!
//! # Example
//!
//! ```rust
//! use warnme_extract::{extract_category, extract_incident_datetime, normalize_time};
//!
//! let subject = "UC Berkeley WarnMe: Robbery Reported. Some May Find the Content Upsetting.";
//! assert_eq!(extract_category(subject).as_deref(), Some("Robbery"));
//!
//! let (date, time) =
//!     extract_incident_datetime("On 3/14/24, at approximately 2130 hours, a robbery occurred", None);
//! assert_eq!(date.unwrap().to_string(), "2024-03-14");
//! assert_eq!(time.unwrap().format("%H:%M").to_string(), "21:30");
//!
//! assert_eq!(
//!     normalize_time("0007"),
//!     (Some("00:07".to_string()), Some("12:07 am".to_string()))
//! );
//! ```

mod body;
mod category;
mod config;
mod datetime;
mod error;
mod location;
mod parser;
mod time;
mod types;

pub use body::{decode_blob, decode_body, strip_html};
pub use category::{clean_category, extract_category};
pub use config::{AlertFilter, MONTH_NAMES, UPSETTING_CONTENT_NOTICE, WARNME_SENDER, month_number};
pub use datetime::{extract_incident_datetime, month_name_date, numeric_date};
pub use error::{ExtractError, Result};
pub use location::{extract_location, labeled_location, narrative_location};
pub use parser::{ParsedAlert, extract_record, parse_alert, parse_alert_mime};
pub use time::{format_12h, normalize_time, parse_time_token};
pub use types::*;
