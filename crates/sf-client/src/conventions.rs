//! Per-API conventions: how a token goes on the wire and how an error body
//! is read back.
//!
//! Salesforce APIs disagree on both. The REST API wants
//! `Authorization: Bearer <token>` and answers errors with JSON, while the
//! Bulk API wants `X-SFDC-Session: <token>` and answers with XML.

use std::sync::LazyLock;

use serde::Deserialize;

use crate::exchange::Exchange;
use crate::response::CompletedExchange;

/// Capability a concrete API client supplies to the dispatcher.
pub trait ApiConventions: Send + Sync + 'static {
    /// Put the exchange's access token on the outgoing request.
    ///
    /// Called from [`Exchange::authenticate`], which the transport runs just
    /// before sending. Exchanges without a token are left untouched.
    fn attach_access_token(&self, exchange: &mut Exchange);

    /// Extract a structured error from a failed response.
    ///
    /// Returns `None` for an empty or unparseable body.
    fn parse_error_body(&self, exchange: &CompletedExchange) -> Option<ApiError>;
}

/// Structured error reported by a Salesforce API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error_code}: {message}")]
pub struct ApiError {
    /// API error code, e.g. `INVALID_FIELD`.
    pub error_code: String,
    /// Human-readable message, sanitized.
    pub message: String,
    /// Fields the error applies to.
    pub fields: Vec<String>,
}

/// REST API conventions: bearer header, JSON error bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestConventions;

impl ApiConventions for RestConventions {
    fn attach_access_token(&self, exchange: &mut Exchange) {
        if let Some(token) = exchange.access_token().map(str::to_owned) {
            exchange.set_header("Authorization", format!("Bearer {}", token));
        }
    }

    fn parse_error_body(&self, exchange: &CompletedExchange) -> Option<ApiError> {
        parse_rest_error(exchange.body())
    }
}

/// Bulk API conventions: session header, XML error bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkConventions;

impl ApiConventions for BulkConventions {
    fn attach_access_token(&self, exchange: &mut Exchange) {
        if let Some(token) = exchange.access_token().map(str::to_owned) {
            exchange.set_header("X-SFDC-Session", token);
        }
    }

    fn parse_error_body(&self, exchange: &CompletedExchange) -> Option<ApiError> {
        parse_bulk_error(exchange.body())
    }
}

/// REST error entry. Salesforce sends either an array of these or one object.
#[derive(Debug, Deserialize)]
struct RestErrorResponse {
    #[serde(alias = "errorCode", alias = "code")]
    error_code: String,
    #[serde(default)]
    message: String,
    fields: Option<Vec<String>>,
}

impl From<RestErrorResponse> for ApiError {
    fn from(err: RestErrorResponse) -> Self {
        ApiError {
            error_code: err.error_code,
            message: sanitize_error_message(&err.message),
            fields: err.fields.unwrap_or_default(),
        }
    }
}

fn parse_rest_error(body: &[u8]) -> Option<ApiError> {
    if body.is_empty() {
        return None;
    }

    if let Ok(errors) = serde_json::from_slice::<Vec<RestErrorResponse>>(body) {
        return errors.into_iter().next().map(Into::into);
    }

    serde_json::from_slice::<RestErrorResponse>(body)
        .ok()
        .map(Into::into)
}

#[derive(Debug, Deserialize)]
#[serde(rename = "error")]
struct BulkErrorResponse {
    #[serde(rename = "exceptionCode")]
    exception_code: String,
    #[serde(rename = "exceptionMessage", default)]
    exception_message: String,
}

fn parse_bulk_error(body: &[u8]) -> Option<ApiError> {
    let xml = std::str::from_utf8(body).ok()?;
    if xml.trim().is_empty() {
        return None;
    }

    let err: BulkErrorResponse = quick_xml::de::from_str(xml).ok()?;
    Some(ApiError {
        error_code: err.exception_code,
        message: sanitize_error_message(&err.exception_message),
        fields: Vec::new(),
    })
}

static TOKEN_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+").expect("valid token pattern")
});

static SESSION_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}").expect("valid session pattern")
});

/// Sanitize an error message to prevent exposing sensitive data.
///
/// Redacts anything shaped like an access token (`00D…!…`) or a `sid=`
/// session id, then truncates to 500 characters.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let sanitized = TOKEN_PATTERN.replace_all(message, "[REDACTED_TOKEN]");
    let mut sanitized = SESSION_PATTERN
        .replace_all(&sanitized, "sid=[REDACTED]")
        .into_owned();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
