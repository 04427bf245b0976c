use crate::core::error_shape::ErrorShape;
use crate::domain::model::{
    ClassifiedResponse, FieldError, OutcomeKind, SearchDiagnostic, SearchWarning,
};
use serde_json::Value;

const NOT_FOUND_FALLBACK: &str = "Not Found";
const UNAUTHORIZED_FALLBACK: &str = "Unauthorized";

/// Shapes the part of `body` relevant to `kind` into that kind's payload.
pub fn normalize(
    kind: OutcomeKind,
    http_status: u16,
    body: &Value,
    errors: &ErrorShape,
) -> ClassifiedResponse {
    match kind {
        OutcomeKind::NotFound => ClassifiedResponse::NotFound(
            errors.first_message().unwrap_or(NOT_FOUND_FALLBACK).to_string(),
        ),
        OutcomeKind::Unauthorized => ClassifiedResponse::Unauthorized(
            errors
                .first_message()
                .unwrap_or(UNAUTHORIZED_FALLBACK)
                .to_string(),
        ),
        OutcomeKind::Forbidden => ClassifiedResponse::Forbidden(
            errors
                .entries
                .iter()
                .map(|entry| entry.message.clone())
                .collect(),
        ),
        OutcomeKind::BadRequest => ClassifiedResponse::BadRequest(errors.raw.clone()),
        OutcomeKind::UnprocessableEntity => ClassifiedResponse::UnprocessableEntity(
            errors
                .entries
                .iter()
                .map(|entry| FieldError {
                    message: entry.message.clone(),
                    extensions: entry.extensions.clone(),
                })
                .collect(),
        ),
        OutcomeKind::NotAcceptable => ClassifiedResponse::NotAcceptable(search_diagnostics(body)),
        OutcomeKind::MultiStatus => ClassifiedResponse::MultiStatus {
            data: data_of(body),
            errors: errors.raw.clone(),
        },
        OutcomeKind::NoContent => ClassifiedResponse::NoContent,
        OutcomeKind::Ok => ClassifiedResponse::Ok(data_of(body)),
        OutcomeKind::Unknown => ClassifiedResponse::Unknown {
            http_status,
            body: body.clone(),
        },
    }
}

fn data_of(body: &Value) -> Value {
    body.get("data").cloned().unwrap_or(Value::Null)
}

fn search_diagnostics(body: &Value) -> Vec<SearchDiagnostic> {
    let Some(Value::Array(items)) = body.get("search") else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let query = match item.get("query")? {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let warnings = match item.get("warnings") {
                Some(Value::Array(warnings)) => warnings.iter().map(search_warning).collect(),
                _ => Vec::new(),
            };
            Some(SearchDiagnostic { query, warnings })
        })
        .collect()
}

fn search_warning(warning: &Value) -> SearchWarning {
    SearchWarning {
        field: warning
            .get("field")
            .and_then(Value::as_str)
            .map(str::to_string),
        message: warning
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}
