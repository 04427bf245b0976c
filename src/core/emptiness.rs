use serde_json::Value;

/// Whether `value` holds any scalar leaf once empty containers are
/// ignored. `null` and `""` count as absent; numbers and booleans
/// (including `0` and `false`) count as values.
pub fn has_values(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(_) | Value::Bool(_) => true,
        Value::Array(items) => items.iter().any(has_values),
        Value::Object(members) => members.values().any(has_values),
    }
}
