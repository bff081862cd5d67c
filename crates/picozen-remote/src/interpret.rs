//! Response interpretation.
//!
//! A listing response is either a JSON object with `dirs`/`files` arrays or
//! an HTML index page. Both are handled behind [`ResponseInterpreter`];
//! [`ContentNegotiatingInterpreter`] picks one from the content type and the
//! shape of the body.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use picozen_core::{Entry, ListingFormat, join_path, normalize_path};
use scraper::{Html, Selector};
use serde_json::{Map, Value};

use crate::error::{RemoteError, RemoteResult};
use crate::url::{is_absolute_href, resolve_href, strip_query};

/// Anchor labels that denote the parent directory in index pages.
const PARENT_LABELS: &[&str] = &["../", "..", "Parent Directory"];

/// Entries parsed from one response, in host order, without a back-entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedListing {
    /// Parsed entries
    pub entries: Vec<Entry>,
    /// Which format they came from
    pub format: ListingFormat,
}

/// Turns a raw response body into listing entries.
pub trait ResponseInterpreter: Send + Sync {
    /// Interpret `body` as the listing of `path`.
    ///
    /// Returns [`RemoteError::Uninterpretable`] when the body is not a
    /// listing this interpreter understands.
    fn interpret(
        &self,
        body: &str,
        content_type: Option<&str>,
        path: &str,
    ) -> RemoteResult<ParsedListing>;
}

// ============================================================================
// JSON
// ============================================================================

/// Interprets `{"dirs": [...], "files": [...]}` objects.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonListingInterpreter;

impl JsonListingInterpreter {
    fn children<'a>(object: &'a Map<String, Value>, key: &str) -> RemoteResult<&'a [Value]> {
        match object.get(key) {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(RemoteError::uninterpretable(format!(
                "`{key}` is not an array"
            ))),
        }
    }

    fn entry(item: &Value, path: &str, is_dir: bool) -> Option<Entry> {
        let item = item.as_object()?;
        let name = item
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())?;

        // Real entries named like the back-entry would be indistinguishable
        if matches!(name, "../" | "..") {
            return None;
        }

        let child_path = item
            .get("path")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .map_or_else(|| join_path(path, name), normalize_path);
        let size = item.get("size").map_or(0, parse_size);

        if is_dir {
            Some(Entry::directory(name, &child_path).with_size(size))
        } else {
            let modified = item
                .get("date")
                .or_else(|| item.get("modified"))
                .and_then(parse_date);
            Some(Entry::file(name, &child_path, size).with_modified(modified))
        }
    }
}

impl ResponseInterpreter for JsonListingInterpreter {
    fn interpret(
        &self,
        body: &str,
        _content_type: Option<&str>,
        path: &str,
    ) -> RemoteResult<ParsedListing> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| RemoteError::uninterpretable(format!("invalid JSON: {e}")))?;
        let Value::Object(object) = value else {
            return Err(RemoteError::uninterpretable("JSON body is not an object"));
        };

        let dirs = Self::children(&object, "dirs")?;
        let files = Self::children(&object, "files")?;

        let entries = dirs
            .iter()
            .filter_map(|item| Self::entry(item, path, true))
            .chain(files.iter().filter_map(|item| Self::entry(item, path, false)))
            .collect();

        Ok(ParsedListing {
            entries,
            format: ListingFormat::Json,
        })
    }
}

/// Sizes arrive as integers, floats or numeric strings; anything else is 0.
fn parse_size(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map_or(0, |f| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let whole = f as u64;
                    whole
                })
        }),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// RFC 3339 strings or epoch milliseconds.
fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

// ============================================================================
// HTML index
// ============================================================================

/// Interprets autoindex-style HTML pages by collecting their anchors.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlIndexInterpreter;

impl HtmlIndexInterpreter {
    fn entry(href: &str, label: &str, path: &str) -> Option<Entry> {
        if label.is_empty() || PARENT_LABELS.contains(&label) {
            return None;
        }
        if href.is_empty() || href.starts_with(['?', '#']) || is_absolute_href(href) {
            return None;
        }

        let target = strip_query(href);
        let decoded = urlencoding::decode(target).map_or_else(|_| target.to_string(), |d| d.into_owned());
        if decoded.is_empty() || matches!(decoded.as_str(), "../" | ".." | "./" | ".") {
            return None;
        }

        let is_dir = decoded.ends_with('/');
        let name = decoded
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|n| !n.is_empty() && !matches!(*n, "." | ".."))?;
        let child_path = resolve_href(path, &decoded);

        Some(if is_dir {
            Entry::directory(name, &child_path)
        } else {
            Entry::file(name, &child_path, 0)
        })
    }
}

impl ResponseInterpreter for HtmlIndexInterpreter {
    fn interpret(
        &self,
        body: &str,
        _content_type: Option<&str>,
        path: &str,
    ) -> RemoteResult<ParsedListing> {
        let selector = Selector::parse("a[href]")
            .map_err(|e| RemoteError::uninterpretable(format!("anchor selector: {e}")))?;
        let document = Html::parse_document(body);

        let mut seen = HashSet::new();
        let entries: Vec<Entry> = document
            .select(&selector)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href")?.trim();
                let label = anchor.text().collect::<String>();
                Self::entry(href, label.trim(), path)
            })
            .filter(|entry| seen.insert(entry.path.clone()))
            .collect();

        if entries.is_empty() {
            return Err(RemoteError::uninterpretable("no directory links found"));
        }

        Ok(ParsedListing {
            entries,
            format: ListingFormat::HtmlIndex,
        })
    }
}

// ============================================================================
// Content negotiation
// ============================================================================

/// Chooses the JSON or HTML interpreter for each response.
///
/// JSON is used when the content type says so (`application/json`,
/// `+json`), or when there is no content type and the body starts with `{`.
/// Everything else is treated as an HTML index.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentNegotiatingInterpreter {
    json: JsonListingInterpreter,
    html: HtmlIndexInterpreter,
}

impl ContentNegotiatingInterpreter {
    /// Create the default composite interpreter.
    pub const fn new() -> Self {
        Self {
            json: JsonListingInterpreter,
            html: HtmlIndexInterpreter,
        }
    }

    fn is_json(body: &str, content_type: Option<&str>) -> bool {
        match content_type.map(str::trim).filter(|c| !c.is_empty()) {
            Some(ct) => {
                let mime = ct
                    .split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_ascii_lowercase();
                mime == "application/json" || mime.ends_with("+json")
            }
            None => body.trim_start().starts_with('{'),
        }
    }
}

impl ResponseInterpreter for ContentNegotiatingInterpreter {
    fn interpret(
        &self,
        body: &str,
        content_type: Option<&str>,
        path: &str,
    ) -> RemoteResult<ParsedListing> {
        if Self::is_json(body, content_type) {
            self.json.interpret(body, content_type, path)
        } else {
            self.html.interpret(body, content_type, path)
        }
    }
}
