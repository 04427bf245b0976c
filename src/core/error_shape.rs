use crate::domain::model::ErrorEntry;
use serde_json::Value;

/// Classification signals read from a response body's `errors` member.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorShape {
    /// `errors` is a non-empty string or a non-empty array.
    pub present: bool,
    pub is_string: bool,
    /// Set when `errors` is a string.
    pub message: Option<String>,
    pub entries: Vec<ErrorEntry>,
    /// The `errors` elements exactly as received.
    pub raw: Vec<Value>,
    pub has_access_denied: bool,
    pub has_field_shape_extension: bool,
}

impl ErrorShape {
    pub fn analyze(body: &Value) -> Self {
        match body.get("errors") {
            Some(Value::String(message)) if !message.is_empty() => Self {
                present: true,
                is_string: true,
                message: Some(message.clone()),
                raw: vec![Value::String(message.clone())],
                ..Self::default()
            },
            Some(Value::Array(items)) if !items.is_empty() => {
                let entries: Vec<ErrorEntry> = items.iter().map(ErrorEntry::from_value).collect();
                let has_access_denied = entries
                    .iter()
                    .any(|entry| entry.code() == Some("ACCESS_DENIED"));
                let has_field_shape_extension =
                    entries.iter().any(ErrorEntry::has_field_shape_extension);

                Self {
                    present: true,
                    is_string: false,
                    message: None,
                    entries,
                    raw: items.clone(),
                    has_access_denied,
                    has_field_shape_extension,
                }
            }
            _ => Self::default(),
        }
    }

    /// The string form of `errors`, or the first entry's message.
    pub fn first_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or_else(|| self.entries.first().map(|entry| entry.message.as_str()))
    }
}
