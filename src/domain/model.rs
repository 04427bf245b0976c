use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A transport-level response handed to the classifier: the HTTP status
/// and the already-parsed JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawApiResponse {
    #[serde(rename = "status", alias = "httpStatus")]
    pub http_status: u16,
    pub body: Value,
}

impl RawApiResponse {
    pub fn new(http_status: u16, body: Value) -> Self {
        Self { http_status, body }
    }
}

/// One segment of a GraphQL error `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(u64),
    Key(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u64,
    pub column: u64,
}

/// A structured GraphQL error entry. Built best-effort: fields that are
/// missing or of the wrong type are left empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

impl ErrorEntry {
    pub fn from_value(value: &Value) -> Self {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::String(message) => {
                return Self {
                    message: message.clone(),
                    ..Self::default()
                }
            }
            _ => return Self::default(),
        };

        let message = match obj.get("message") {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        let path = match obj.get("path") {
            Some(Value::Array(segments)) => segments
                .iter()
                .filter_map(|segment| match segment {
                    Value::String(key) => Some(PathSegment::Key(key.clone())),
                    Value::Number(n) => n.as_u64().map(PathSegment::Index),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        let locations = match obj.get("locations") {
            Some(Value::Array(locations)) => locations
                .iter()
                .filter_map(|location| {
                    let line = location.get("line")?.as_u64()?;
                    let column = location.get("column")?.as_u64()?;
                    Some(ErrorLocation { line, column })
                })
                .collect(),
            _ => Vec::new(),
        };

        let extensions = match obj.get("extensions") {
            Some(Value::Object(ext)) => ext.clone(),
            _ => Map::new(),
        };

        Self {
            message,
            path,
            locations,
            extensions,
        }
    }

    /// `extensions.code`, when it is a string.
    pub fn code(&self) -> Option<&str> {
        self.extensions.get("code").and_then(Value::as_str)
    }

    pub fn has_field_shape_extension(&self) -> bool {
        ["code", "typeName", "fieldName"]
            .iter()
            .all(|key| self.extensions.contains_key(*key))
    }
}

/// The category assigned to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Ok,
    NoContent,
    MultiStatus,
    BadRequest,
    NotAcceptable,
    Unauthorized,
    Forbidden,
    NotFound,
    UnprocessableEntity,
    Unknown,
}

impl OutcomeKind {
    /// The nine defined kinds; `Unknown` is the fallback and not listed.
    pub const ALL: [OutcomeKind; 9] = [
        OutcomeKind::Ok,
        OutcomeKind::NoContent,
        OutcomeKind::MultiStatus,
        OutcomeKind::BadRequest,
        OutcomeKind::NotAcceptable,
        OutcomeKind::Unauthorized,
        OutcomeKind::Forbidden,
        OutcomeKind::NotFound,
        OutcomeKind::UnprocessableEntity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Ok => "OK",
            OutcomeKind::NoContent => "NO_CONTENT",
            OutcomeKind::MultiStatus => "MULTI_STATUS",
            OutcomeKind::BadRequest => "BAD_REQUEST",
            OutcomeKind::NotAcceptable => "NOT_ACCEPTABLE",
            OutcomeKind::Unauthorized => "UNAUTHORIZED",
            OutcomeKind::Forbidden => "FORBIDDEN",
            OutcomeKind::NotFound => "NOT_FOUND",
            OutcomeKind::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            OutcomeKind::Unknown => "UNKNOWN",
        }
    }

    /// The HTTP status each kind is named after.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            OutcomeKind::Ok => Some(200),
            OutcomeKind::NoContent => Some(204),
            OutcomeKind::MultiStatus => Some(207),
            OutcomeKind::BadRequest => Some(400),
            OutcomeKind::Unauthorized => Some(401),
            OutcomeKind::Forbidden => Some(403),
            OutcomeKind::NotFound => Some(404),
            OutcomeKind::NotAcceptable => Some(406),
            OutcomeKind::UnprocessableEntity => Some(422),
            OutcomeKind::Unknown => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            OutcomeKind::Ok | OutcomeKind::NoContent | OutcomeKind::MultiStatus
        )
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            OutcomeKind::Ok => "Use the returned data",
            OutcomeKind::NoContent => "The query matched nothing; treat as an empty result",
            OutcomeKind::MultiStatus => "Use the returned data and warn about the reported errors",
            OutcomeKind::BadRequest => "The query is malformed; fix the GraphQL document",
            OutcomeKind::NotAcceptable => {
                "The search input was not understood; check the query filter syntax"
            }
            OutcomeKind::Unauthorized => "Refresh the access token and retry",
            OutcomeKind::Forbidden => "The app lacks an access scope; surface this to the user",
            OutcomeKind::NotFound => "Check the shop domain and API version",
            OutcomeKind::UnprocessableEntity => {
                "A requested field does not exist on its type; fix the selection set"
            }
            OutcomeKind::Unknown => "Unexpected response; log the status and body for diagnosis",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutcomeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutcomeKind::ALL
            .iter()
            .chain(std::iter::once(&OutcomeKind::Unknown))
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown outcome kind: {}", s))
    }
}

/// Payload entry for `UNPROCESSABLE_ENTITY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
    pub extensions: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchWarning {
    pub field: Option<String>,
    pub message: String,
}

/// Payload entry for `NOT_ACCEPTABLE`: one parsed-search diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDiagnostic {
    pub query: String,
    pub warnings: Vec<SearchWarning>,
}

/// The classifier's result. Each variant carries the payload shape for
/// its kind, so callers handle every outcome through an exhaustive match.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedResponse {
    Ok(Value),
    NoContent,
    MultiStatus { data: Value, errors: Vec<Value> },
    BadRequest(Vec<Value>),
    NotAcceptable(Vec<SearchDiagnostic>),
    Unauthorized(String),
    Forbidden(Vec<String>),
    NotFound(String),
    UnprocessableEntity(Vec<FieldError>),
    Unknown { http_status: u16, body: Value },
}

impl ClassifiedResponse {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ClassifiedResponse::Ok(_) => OutcomeKind::Ok,
            ClassifiedResponse::NoContent => OutcomeKind::NoContent,
            ClassifiedResponse::MultiStatus { .. } => OutcomeKind::MultiStatus,
            ClassifiedResponse::BadRequest(_) => OutcomeKind::BadRequest,
            ClassifiedResponse::NotAcceptable(_) => OutcomeKind::NotAcceptable,
            ClassifiedResponse::Unauthorized(_) => OutcomeKind::Unauthorized,
            ClassifiedResponse::Forbidden(_) => OutcomeKind::Forbidden,
            ClassifiedResponse::NotFound(_) => OutcomeKind::NotFound,
            ClassifiedResponse::UnprocessableEntity(_) => OutcomeKind::UnprocessableEntity,
            ClassifiedResponse::Unknown { .. } => OutcomeKind::Unknown,
        }
    }

    /// Usable data, for `OK` and `MULTI_STATUS`.
    pub fn data(&self) -> Option<&Value> {
        match self {
            ClassifiedResponse::Ok(data) | ClassifiedResponse::MultiStatus { data, .. } => {
                Some(data)
            }
            _ => None,
        }
    }

    /// Every human-readable error message carried by the payload.
    pub fn messages(&self) -> Vec<String> {
        fn entry_message(entry: &Value) -> Option<String> {
            match entry {
                Value::String(s) => Some(s.clone()),
                other => other.get("message")?.as_str().map(str::to_string),
            }
        }

        match self {
            ClassifiedResponse::Ok(_)
            | ClassifiedResponse::NoContent
            | ClassifiedResponse::Unknown { .. } => Vec::new(),
            ClassifiedResponse::MultiStatus { errors, .. }
            | ClassifiedResponse::BadRequest(errors) => {
                errors.iter().filter_map(entry_message).collect()
            }
            ClassifiedResponse::NotAcceptable(diagnostics) => diagnostics
                .iter()
                .flat_map(|d| d.warnings.iter().map(|w| w.message.clone()))
                .collect(),
            ClassifiedResponse::Unauthorized(message) | ClassifiedResponse::NotFound(message) => {
                vec![message.clone()]
            }
            ClassifiedResponse::Forbidden(messages) => messages.clone(),
            ClassifiedResponse::UnprocessableEntity(errors) => {
                errors.iter().map(|e| e.message.clone()).collect()
            }
        }
    }

    /// The payload rendered back to JSON; `null` for `NO_CONTENT`.
    pub fn payload_value(&self) -> Value {
        match self {
            ClassifiedResponse::Ok(data) => data.clone(),
            ClassifiedResponse::NoContent => Value::Null,
            ClassifiedResponse::MultiStatus { data, errors } => serde_json::json!({
                "data": data,
                "errors": errors,
            }),
            ClassifiedResponse::BadRequest(errors) => Value::Array(errors.clone()),
            ClassifiedResponse::NotAcceptable(diagnostics) => {
                serde_json::to_value(diagnostics).unwrap_or(Value::Null)
            }
            ClassifiedResponse::Unauthorized(message) | ClassifiedResponse::NotFound(message) => {
                Value::String(message.clone())
            }
            ClassifiedResponse::Forbidden(messages) => {
                Value::Array(messages.iter().cloned().map(Value::String).collect())
            }
            ClassifiedResponse::UnprocessableEntity(errors) => {
                serde_json::to_value(errors).unwrap_or(Value::Null)
            }
            ClassifiedResponse::Unknown { http_status, body } => serde_json::json!({
                "httpStatus": http_status,
                "body": body,
            }),
        }
    }
}

/// A classification result stamped for output and diagnostic logging.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub classified_at: DateTime<Utc>,
    pub http_status: u16,
    pub kind: OutcomeKind,
    pub payload: Value,
}

impl ClassificationReport {
    pub fn new(http_status: u16, classified: &ClassifiedResponse) -> Self {
        Self {
            classified_at: Utc::now(),
            http_status,
            kind: classified.kind(),
            payload: classified.payload_value(),
        }
    }
}

/// A GraphQL-over-HTTP request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
    #[serde(
        default,
        rename = "operationName",
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_entry_from_full_object() {
        let entry = ErrorEntry::from_value(&json!({
            "message": "Field 'nope' doesn't exist on type 'Order'",
            "path": ["query", "orders", 0, "nope"],
            "locations": [{"line": 3, "column": 7}],
            "extensions": {"code": "undefinedField", "typeName": "Order", "fieldName": "nope"}
        }));

        assert_eq!(entry.message, "Field 'nope' doesn't exist on type 'Order'");
        assert_eq!(
            entry.path,
            vec![
                PathSegment::Key("query".to_string()),
                PathSegment::Key("orders".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("nope".to_string()),
            ]
        );
        assert_eq!(entry.locations, vec![ErrorLocation { line: 3, column: 7 }]);
        assert_eq!(entry.code(), Some("undefinedField"));
        assert!(entry.has_field_shape_extension());
    }

    #[test]
    fn test_error_entry_is_best_effort() {
        let entry = ErrorEntry::from_value(&json!({
            "message": 42,
            "locations": [{"line": "x"}],
            "extensions": "nope"
        }));
        assert_eq!(entry, ErrorEntry::default());

        let entry = ErrorEntry::from_value(&json!("plain text"));
        assert_eq!(entry.message, "plain text");

        assert_eq!(ErrorEntry::from_value(&json!(null)), ErrorEntry::default());
    }

    #[test]
    fn test_outcome_kind_round_trips_through_str() {
        for kind in OutcomeKind::ALL {
            assert_eq!(kind.as_str().parse::<OutcomeKind>().unwrap(), kind);
        }
        assert_eq!("unknown".parse::<OutcomeKind>().unwrap(), OutcomeKind::Unknown);
        assert!("TEAPOT".parse::<OutcomeKind>().is_err());
    }

    #[test]
    fn test_outcome_kind_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_value(OutcomeKind::UnprocessableEntity).unwrap(),
            json!("UNPROCESSABLE_ENTITY")
        );
        assert_eq!(OutcomeKind::MultiStatus.to_string(), "MULTI_STATUS");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(OutcomeKind::NotAcceptable.http_status(), Some(406));
        assert_eq!(OutcomeKind::UnprocessableEntity.http_status(), Some(422));
        assert_eq!(OutcomeKind::Unknown.http_status(), None);
        assert!(OutcomeKind::MultiStatus.is_success());
        assert!(!OutcomeKind::Forbidden.is_success());
    }

    #[test]
    fn test_payload_value_for_no_content_is_null() {
        assert_eq!(ClassifiedResponse::NoContent.payload_value(), Value::Null);
    }

    #[test]
    fn test_messages_collects_from_raw_entries() {
        let classified = ClassifiedResponse::MultiStatus {
            data: json!({"shop": {"name": "League"}}),
            errors: vec![json!({"message": "Throttled"}), json!({"oops": true})],
        };
        assert_eq!(classified.messages(), vec!["Throttled".to_string()]);
        assert_eq!(
            classified.data(),
            Some(&json!({"shop": {"name": "League"}}))
        );
    }

    #[test]
    fn test_raw_api_response_accepts_both_status_spellings() {
        let a: RawApiResponse = serde_json::from_value(json!({"status": 200, "body": {}})).unwrap();
        let b: RawApiResponse =
            serde_json::from_value(json!({"httpStatus": 200, "body": {}})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_graphql_request_serialization() {
        let request = GraphqlRequest::new("query Orders { orders(first: 1) { edges { node { id } } } }")
            .with_operation_name("Orders");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["operationName"], json!("Orders"));
        assert!(body.get("variables").is_none());
    }
}
