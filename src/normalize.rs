//! Shape normalizer for evolvable record fields. A field that used to hold
//! one record and now holds a list of records is collapsed to the list form
//! once, at ingestion, so renderers only see one shape.

use issp_idf::{Record, Row, Value};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape<'a> {
    /// A single record from before the field became a list.
    Legacy(&'a Record),
    Current(&'a [Value]),
    Empty,
}

impl<'a> FieldShape<'a> {
    /// Unrecognised shapes (scalars, empty objects) classify as `Empty`.
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Array(items)) if !items.is_empty() => FieldShape::Current(items),
            Some(Value::Object(record)) if !record.is_empty() => FieldShape::Legacy(record),
            Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => FieldShape::Empty,
            Some(other) => {
                debug!("Unrecognised field shape {}, treating as empty", kind(other));
                FieldShape::Empty
            }
        }
    }

    /// The canonical list of records. Non-object list items are skipped.
    pub fn records(self) -> Vec<&'a Record> {
        match self {
            FieldShape::Legacy(record) => vec![record],
            FieldShape::Current(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(record) => Some(record),
                    other => {
                        debug!("Skipping {} in record list", kind(other));
                        None
                    }
                })
                .collect(),
            FieldShape::Empty => Vec::new(),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Table rows for a field in either shape.
pub fn normalize_rows(value: Option<&Value>) -> Vec<Row> {
    FieldShape::classify(value)
        .records()
        .into_iter()
        .map(|record| Row::new(record.clone()))
        .collect()
}
