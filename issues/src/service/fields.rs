//! Reading loosely typed request bodies.
//!
//! Bodies arrive either as JSON objects or as urlencoded forms, so a field
//! may hold any JSON value. Text fields accept strings, numbers and booleans;
//! `open` accepts booleans plus their usual string and numeric spellings.

use mongodb::bson::Bson;
use serde_json::{Map, Value};

pub type Fields = Map<String, Value>;

/// Textual content of a field. `None` for null and for values that have no
/// textual form.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A field that is present, textual and non-empty.
pub fn non_empty_text(fields: &Fields, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(text)
        .filter(|value| !value.is_empty())
}

/// Boolean spellings shared by update bodies and list filters.
pub fn flag_text(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(value) => Some(*value),
        Value::String(value) => flag_text(value),
        Value::Number(value) => match value.as_f64() {
            Some(n) if n == 1.0 => Some(true),
            Some(n) if n == 0.0 => Some(false),
            _ => None,
        },
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// The value stored for an updatable field, or `None` when the value cannot
/// be represented in that field.
pub fn stored_value(field: &str, value: &Value) -> Option<Bson> {
    if field == common::entities::issue::OPEN {
        flag(value).map(Bson::Boolean)
    } else {
        text(value).map(Bson::String)
    }
}

/// Whether an update field counts as supplied. Null and the empty string both
/// mean "leave unchanged".
pub fn is_supplied(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(value) => !value.is_empty(),
        _ => true,
    }
}

pub fn from_pairs(pairs: Vec<(String, String)>) -> Fields {
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_accepts_scalars_only() {
        assert_eq!(text(&json!("a")).as_deref(), Some("a"));
        assert_eq!(text(&json!(12)).as_deref(), Some("12"));
        assert_eq!(text(&json!(false)).as_deref(), Some("false"));
        assert_eq!(text(&json!(null)), None);
        assert_eq!(text(&json!(["a"])), None);
    }

    #[test]
    fn empty_required_text_counts_as_missing() {
        let fields = from_pairs(vec![("issue_title".to_string(), String::new())]);
        assert_eq!(non_empty_text(&fields, "issue_title"), None);
        assert_eq!(non_empty_text(&fields, "issue_text"), None);
    }

    #[test]
    fn flags_accept_string_spellings() {
        assert_eq!(flag(&json!("false")), Some(false));
        assert_eq!(flag(&json!("true")), Some(true));
        assert_eq!(flag(&json!(0)), Some(false));
        assert_eq!(flag(&json!(false)), Some(false));
        assert_eq!(flag(&json!("closed")), None);
    }

    #[test]
    fn open_is_always_stored_as_boolean() {
        assert_eq!(stored_value("open", &json!("false")), Some(Bson::Boolean(false)));
        assert_eq!(stored_value("open", &json!("maybe")), None);
        assert_eq!(
            stored_value("status_text", &json!(3)),
            Some(Bson::String("3".to_string()))
        );
    }

    #[test]
    fn false_is_supplied_but_empty_string_is_not() {
        assert!(is_supplied(&json!(false)));
        assert!(is_supplied(&json!(0)));
        assert!(!is_supplied(&json!("")));
        assert!(!is_supplied(&json!(null)));
    }
}
