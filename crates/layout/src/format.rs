//! Value formatter: turns optional scalars and arrays from a record into
//! display strings.

use issp_idf::Value;

/// Shown in prose for missing or blank values.
pub const PLACEHOLDER: &str = "N/A";

/// Shown in place of a block that has nothing to render.
pub const NO_DATA: &str = "No data provided.";

/// Display string for `value`, or `None` when there is nothing to show.
fn display(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) if map.is_empty() => None,
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Prose rendering: missing, blank or empty values become [`PLACEHOLDER`].
pub fn format_value(value: &Value) -> String {
    display(value).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Table cell rendering: missing values stay empty so sparse tables read as
/// blank rather than a column of placeholders.
pub fn format_cell(value: &Value) -> String {
    display(value).unwrap_or_default()
}

pub fn format_opt(value: Option<&Value>) -> String {
    value.map(format_value).unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_cell_opt(value: Option<&Value>) -> String {
    value.map(format_cell).unwrap_or_default()
}

pub fn is_blank(value: &Value) -> bool {
    display(value).is_none()
}

/// Converts an identifier-style key into a title: `visionStatement` becomes
/// `Vision Statement`, `total_cost` becomes `Total Cost`, `ISSPYear` becomes
/// `ISSP Year`.
pub fn format_key_label(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for segment in key.split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace()) {
        let chars: Vec<char> = segment.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && c.is_uppercase() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                if prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower)
                {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }

    words
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_values_become_placeholder() {
        assert_eq!(format_value(&Value::Null), PLACEHOLDER);
        assert_eq!(format_value(&json!("")), PLACEHOLDER);
        assert_eq!(format_value(&json!("   ")), PLACEHOLDER);
        assert_eq!(format_opt(None), PLACEHOLDER);
        assert_eq!(format_value(&json!([])), PLACEHOLDER);
        assert_eq!(format_value(&json!(["", null])), PLACEHOLDER);
    }

    #[test]
    fn arrays_are_comma_joined() {
        assert_eq!(format_value(&json!(["a", "b"])), "a, b");
        assert_eq!(format_value(&json!(["a", " ", 3])), "a, 3");
    }

    #[test]
    fn scalars_are_stringified() {
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(2.5)), "2.5");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!("  Serve students. ")), "Serve students.");
        assert_eq!(format_value(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn cells_suppress_placeholder() {
        assert_eq!(format_cell(&Value::Null), "");
        assert_eq!(format_cell(&json!(" ")), "");
        assert_eq!(format_cell_opt(None), "");
        assert_eq!(format_cell(&json!("x")), "x");
        // A literal "N/A" typed by the user is data, not a missing value.
        assert_eq!(format_cell(&json!("N/A")), "N/A");
    }

    #[test]
    fn key_labels() {
        assert_eq!(format_key_label("visionStatement"), "Vision Statement");
        assert_eq!(format_key_label("total_cost"), "Total Cost");
        assert_eq!(format_key_label("ISSPYear"), "ISSP Year");
        assert_eq!(format_key_label("year-1 target"), "Year 1 Target");
        assert_eq!(format_key_label("unit2Cost"), "Unit2 Cost");
        assert_eq!(format_key_label(""), "");
    }
}
