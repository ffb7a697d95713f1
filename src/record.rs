//! Read-only access to one saved business record.

use crate::normalize::normalize_rows;
use base64::Engine;
use issp_idf::{ImagePayload, KeyValue, Row, Value};
use log::{debug, warn};

/// A view over a record with dotted-path accessors such as
/// `"profile.visionStatement"` or `"systems.0.name"`. Absent or partial
/// fields never fail; they come back empty.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    root: &'a Value,
}

impl<'a> RecordView<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    pub fn get(&self, path: &str) -> Option<&'a Value> {
        if path.is_empty() {
            return Some(self.root);
        }
        path.split('.').try_fold(self.root, |value, segment| match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Sub-view rooted at `path`, or `None` when the path is absent.
    pub fn at(&self, path: &str) -> Option<RecordView<'a>> {
        self.get(path).map(RecordView::new)
    }

    /// The value at `path`, or `Null`.
    pub fn scalar(&self, path: &str) -> Value {
        self.get(path).cloned().unwrap_or(Value::Null)
    }

    /// Rows of a list-of-records field, accepting the legacy single-record
    /// shape too.
    pub fn rows(&self, path: &str) -> Vec<Row> {
        normalize_rows(self.get(path))
    }

    /// Flat key/value entries from an object (`{"key": value}`) or a list of
    /// `{"key": .., "value": ..}` objects.
    pub fn entries(&self, path: &str) -> Vec<KeyValue> {
        match self.get(path) {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
                .collect(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| {
                    let key = item.get("key")?.as_str()?;
                    let value = item.get("value").cloned().unwrap_or(Value::Null);
                    let entry = KeyValue::new(key, value);
                    Some(match item.get("label").and_then(Value::as_str) {
                        Some(label) => entry.labelled(label),
                        None => entry,
                    })
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// An uploaded file stored as a data URI. Blank or missing is `None`;
    /// anything else present is a payload, drawable or not.
    pub fn image(&self, path: &str) -> Option<ImagePayload> {
        match self.get(path)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(parse_data_uri(s.trim()).unwrap_or_else(|| {
                debug!("Field '{}' is not a base64 data URI", path);
                ImagePayload::new("application/octet-stream", Vec::new())
            })),
            _ => Some(ImagePayload::new("application/octet-stream", Vec::new())),
        }
    }
}

/// Parses `data:<mime>[;base64],<payload>`. A base64 body that fails to
/// decode keeps its mime with no bytes, so it still reads as an upload.
pub fn parse_data_uri(uri: &str) -> Option<ImagePayload> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header
        .split(';')
        .next()
        .filter(|m| !m.is_empty())
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = if header.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        match base64::engine::general_purpose::STANDARD.decode(compact) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Undecodable base64 payload for {}: {}", mime, e);
                Vec::new()
            }
        }
    } else {
        payload.as_bytes().to_vec()
    };
    Some(ImagePayload::new(mime, bytes))
}
