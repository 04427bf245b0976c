use crate::core::emptiness::has_values;
use crate::core::error_shape::ErrorShape;
use crate::core::normalizer;
use crate::domain::model::{ClassifiedResponse, OutcomeKind, RawApiResponse};
use serde_json::Value;

/// The ordered classification rules. Evaluation stops at the first
/// rule that matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    TransportNotFound,
    TransportUnauthorized,
    NonSuccessStatus,
    AccessDenied,
    MalformedQuery,
    UndefinedField,
    PartialData,
    SearchDiagnostics,
    EmptyResult,
    FullResult,
    Unmatched,
}

impl Rule {
    /// Rules that inspect the body, in evaluation order.
    pub const BODY_RULES: [Rule; 7] = [
        Rule::AccessDenied,
        Rule::MalformedQuery,
        Rule::UndefinedField,
        Rule::PartialData,
        Rule::SearchDiagnostics,
        Rule::EmptyResult,
        Rule::FullResult,
    ];

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Rule::TransportNotFound => OutcomeKind::NotFound,
            Rule::TransportUnauthorized => OutcomeKind::Unauthorized,
            Rule::NonSuccessStatus | Rule::Unmatched => OutcomeKind::Unknown,
            Rule::AccessDenied => OutcomeKind::Forbidden,
            Rule::MalformedQuery => OutcomeKind::BadRequest,
            Rule::UndefinedField => OutcomeKind::UnprocessableEntity,
            Rule::PartialData => OutcomeKind::MultiStatus,
            Rule::SearchDiagnostics => OutcomeKind::NotAcceptable,
            Rule::EmptyResult => OutcomeKind::NoContent,
            Rule::FullResult => OutcomeKind::Ok,
        }
    }

    /// Whether this body rule holds for `signals`. Status rules and
    /// `Unmatched` never match here.
    pub fn matches(&self, signals: &Signals) -> bool {
        let errors = &signals.errors;
        match self {
            Rule::AccessDenied => {
                errors.present && signals.data_is_null && errors.has_access_denied
            }
            Rule::MalformedQuery => {
                errors.present
                    && !signals.has_data
                    && !errors.is_string
                    && !errors.has_field_shape_extension
            }
            Rule::UndefinedField => {
                errors.present && !signals.has_data && errors.has_field_shape_extension
            }
            Rule::PartialData => errors.present && signals.data_has_values,
            Rule::SearchDiagnostics => !errors.present && signals.has_search_diagnostics,
            // Both guard on the absence of search diagnostics so no body
            // matches more than one rule.
            Rule::EmptyResult => {
                !errors.present && !signals.has_search_diagnostics && !signals.data_has_values
            }
            Rule::FullResult => {
                !errors.present && !signals.has_search_diagnostics && signals.data_has_values
            }
            Rule::TransportNotFound
            | Rule::TransportUnauthorized
            | Rule::NonSuccessStatus
            | Rule::Unmatched => false,
        }
    }
}

/// Structural facts about a response body that the rules are written
/// against.
#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    pub errors: ErrorShape,
    /// The body has a `data` member, even if it is `null`.
    pub has_data: bool,
    pub data_is_null: bool,
    pub data_has_values: bool,
    /// A top-level `search` array with at least one element carrying `query`.
    pub has_search_diagnostics: bool,
}

impl Signals {
    pub fn read(body: &Value) -> Self {
        let data = body.get("data");
        let has_data = data.is_some();
        let data_is_null = matches!(data, Some(Value::Null));
        let data_has_values = data.is_some_and(has_values);

        let has_search_diagnostics = match body.get("search") {
            Some(Value::Array(items)) => items.iter().any(|item| item.get("query").is_some()),
            _ => false,
        };

        Self {
            errors: ErrorShape::analyze(body),
            has_data,
            data_is_null,
            data_has_values,
            has_search_diagnostics,
        }
    }
}

fn is_success_status(http_status: u16) -> bool {
    (200..=299).contains(&http_status)
}

/// Picks the first rule that applies to `(http_status, signals)`.
pub fn decide(http_status: u16, signals: &Signals) -> Rule {
    match http_status {
        404 => Rule::TransportNotFound,
        401 => Rule::TransportUnauthorized,
        status if !is_success_status(status) => Rule::NonSuccessStatus,
        _ => Rule::BODY_RULES
            .into_iter()
            .find(|rule| rule.matches(signals))
            .unwrap_or(Rule::Unmatched),
    }
}

/// Every body rule that holds for `body`, ignoring evaluation order.
/// At most one rule matches for any body.
pub fn matching_body_rules(body: &Value) -> Vec<Rule> {
    let signals = Signals::read(body);
    Rule::BODY_RULES
        .into_iter()
        .filter(|rule| rule.matches(&signals))
        .collect()
}

/// Classifies a GraphQL response. Total and deterministic: every
/// `(http_status, body)` pair maps to exactly one outcome.
pub fn classify(http_status: u16, body: &Value) -> ClassifiedResponse {
    let signals = Signals::read(body);
    let rule = decide(http_status, &signals);
    normalizer::normalize(rule.kind(), http_status, body, &signals.errors)
}

pub fn classify_response(response: &RawApiResponse) -> ClassifiedResponse {
    classify(response.http_status, &response.body)
}
