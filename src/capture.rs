//! Capture payloads and their org-mode rendering

use serde::Deserialize;
use serde_json::{Map, Value};

/// Marker that opens every captured headline
pub const HEADLINE_MARKER: &str = "** TODO ";

/// A note submitted to the capture endpoint.
///
/// Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Note {
    /// Routing tag; decoded but not yet used for dispatch
    pub tag: String,

    pub headline: String,

    pub body: String,

    /// Tag-specific payload
    #[serde(rename = "tagData")]
    pub tag_data: String,
}

impl Note {
    /// Create a note with a headline and body
    pub fn new(headline: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    /// Decode a request body, accepting anything.
    ///
    /// Only the first JSON value is read, and invalid UTF-8 becomes U+FFFD.
    /// When it is an object, every known key holding a string is kept and the
    /// rest stay empty. Keys match case-insensitively, an exact match winning.
    /// Anything that is not a JSON object decodes to an empty note. Failures
    /// are logged, never returned.
    pub fn decode_lenient(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let first = serde_json::Deserializer::from_str(&text)
            .into_iter::<Value>()
            .next();

        match first {
            Some(Ok(Value::Object(fields))) => Self::from_fields(&fields),
            Some(Ok(other)) => {
                tracing::warn!("Capture payload is not an object ({}), using empty note", kind(&other));
                Self::default()
            }
            Some(Err(e)) => {
                tracing::warn!("Malformed capture payload, using empty note: {}", e);
                Self::default()
            }
            None => {
                tracing::debug!("Empty capture payload");
                Self::default()
            }
        }
    }

    /// Decode a request body, rejecting anything but a well-formed note
    pub fn decode_strict(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let take = |key: &str| match lookup_key(fields, key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => {
                tracing::warn!("Ignoring capture field {:?}: expected string, got {}", key, kind(other));
                String::new()
            }
        };

        Self {
            tag: take("tag"),
            headline: take("headline"),
            body: take("body"),
            tag_data: take("tagData"),
        }
    }
}

fn lookup_key<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).or_else(|| {
        fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The rendered text of a note, ready to append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry(Vec<u8>);

impl Entry {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&Note> for Entry {
    fn from(note: &Note) -> Self {
        let text = format!("{}{}\n{}\n\n", HEADLINE_MARKER, note.headline, note.body);
        Self(text.into_bytes())
    }
}

impl AsRef<[u8]> for Entry {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
