//! Message body decoding into a single plain-text string

use crate::error::{ExtractError, Result};
use crate::types::{BlobEncoding, RawPayload, decode_base64url};
use regex::Regex;
use tracing::debug;

// Soft line breaks or =XX escapes left behind by a quoted-printable source
static QUOTED_PRINTABLE_HINT: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"=\r?\n|=[0-9A-Fa-f]{2}").unwrap());

static SCRIPT_STYLE_BLOCK: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").unwrap()
});

static HTML_TAG: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?s)<\s*/?\s*([a-zA-Z0-9]*)[^>]*>").unwrap());

static NUMERIC_ENTITY: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"&#(?:[xX]([0-9A-Fa-f]{1,6})|([0-9]{1,7}));").unwrap()
});

/// Tags that separate words when removed
const BLOCK_TAGS: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "tr", "td", "th", "table", "h1", "h2", "h3", "h4", "h5",
    "h6", "hr", "body", "html", "head", "title", "blockquote", "pre",
];

/// Decoded text of a message, bucketed by MIME type
#[derive(Debug, Default)]
struct TextParts {
    plain: Vec<String>,
    html: Vec<String>,
}

type BodyCandidate = fn(&TextParts, Option<&str>) -> Option<String>;

/// Tried in order; the first non-empty rendering wins
const CANDIDATES: &[BodyCandidate] = &[plain_candidate, html_candidate, snippet_candidate];

/// Render a payload tree as plain text.
///
/// All `text/plain` leaves are preferred, joined by blank lines; otherwise the
/// `text/html` leaves are flattened to text; otherwise the message snippet is
/// used. Leaves that fail to decode are skipped.
#[must_use]
pub fn decode_body(payload: &RawPayload, snippet: Option<&str>) -> String {
    let parts = collect_text_parts(payload);
    CANDIDATES
        .iter()
        .find_map(|candidate| candidate(&parts, snippet))
        .unwrap_or_default()
}

fn collect_text_parts(payload: &RawPayload) -> TextParts {
    let mut parts = TextParts::default();

    for leaf in payload.leaves() {
        let Some(data) = leaf.data() else {
            continue;
        };
        let mime_type = leaf.mime_type.to_lowercase();
        let is_plain = mime_type.starts_with("text/plain");
        let is_html = mime_type.starts_with("text/html");
        if !is_plain && !is_html {
            continue;
        }

        match decode_blob(data, leaf.encoding) {
            Ok(text) if is_plain => parts.plain.push(text),
            Ok(text) => parts.html.push(text),
            Err(e) => debug!("Skipping undecodable {} part: {}", mime_type, e),
        }
    }

    parts
}

fn plain_candidate(parts: &TextParts, _snippet: Option<&str>) -> Option<String> {
    let joined = parts.plain.join("\n\n");
    (!joined.trim().is_empty()).then_some(joined)
}

fn html_candidate(parts: &TextParts, _snippet: Option<&str>) -> Option<String> {
    let text = strip_html(&parts.html.join("\n\n"));
    (!text.is_empty()).then_some(text)
}

fn snippet_candidate(_parts: &TextParts, snippet: Option<&str>) -> Option<String> {
    snippet
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Decode one body blob into text.
///
/// Base64url content that still looks quoted-printable is decoded a second
/// time; if that second pass fails the base64 result is kept.
pub fn decode_blob(data: &str, encoding: BlobEncoding) -> Result<String> {
    match encoding {
        BlobEncoding::Base64Url => {
            let bytes = decode_base64url(data)?;
            let text = String::from_utf8_lossy(&bytes).into_owned();
            if QUOTED_PRINTABLE_HINT.is_match(&text) {
                Ok(decode_quoted_printable(&text).unwrap_or(text))
            } else {
                Ok(text)
            }
        }
        BlobEncoding::QuotedPrintable => decode_quoted_printable(data),
        BlobEncoding::Identity => Ok(data.to_string()),
    }
}

fn decode_quoted_printable(text: &str) -> Result<String> {
    quoted_printable::decode(text.as_bytes(), quoted_printable::ParseMode::Robust)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|e| ExtractError::Decode(e.to_string()))
}

/// Flatten HTML to a single line of text.
///
/// Script and style blocks go with their content. Block-level tags become a
/// space and inline tags vanish. Numeric references (`&#8217;`, `&#x27;`) and
/// the named entities `&nbsp; &lt; &gt; &quot; &apos; &amp;` are decoded, then
/// whitespace runs collapse to one space. Other named entities pass through.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let without_blocks = SCRIPT_STYLE_BLOCK.replace_all(html, " ");
    let without_tags = HTML_TAG.replace_all(&without_blocks, |caps: &regex::Captures| {
        let name = caps[1].to_lowercase();
        if BLOCK_TAGS.contains(&name.as_str()) {
            " "
        } else {
            ""
        }
    });

    let decoded = decode_numeric_entities(&without_tags)
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace `&#NNN;` and `&#xHH;` with their characters; invalid code points stay as written
fn decode_numeric_entities(text: &str) -> String {
    NUMERIC_ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (None, Some(dec)) => dec.as_str().parse().ok(),
                (None, None) => None,
            };
            code.and_then(char::from_u32)
                .map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}
