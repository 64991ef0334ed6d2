//! Error types for search operations
//!
//! A failed search still hands back whatever the client learned about the
//! exchange (status, headers, request URL, total hits). `SearchFailure`
//! carries that partial `Response` next to the `SearchError` describing what
//! went wrong.

use crate::hit::null_as_default;
use crate::response::Response;
use crate::transport::TransportError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// An error reported by the search service itself.
///
/// The service answers failed requests with a JSON body such as
/// `{"code":400,"message":"Invalid parameters: site"}`. Unknown keys are
/// ignored and missing or `null` keys decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("catalog-search: HTTP {}: {message}", code_line(.code))]
#[serde(default)]
pub struct ApiError {
    /// Numeric error code, normally the HTTP status code but any integer
    /// the service chooses
    #[serde(deserialize_with = "null_as_default")]
    pub code: i64,
    /// Human readable description
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

impl ApiError {
    /// Decodes an error document. Only a JSON object is accepted.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let document: Map<String, Value> = serde_json::from_slice(body)?;
        serde_json::from_value(Value::Object(document))
    }

    /// Uses the HTTP status when the body did not carry a code.
    pub(crate) fn or_status(mut self, status: StatusCode) -> Self {
        if self.code == 0 {
            self.code = i64::from(status.as_u16());
        }
        self
    }
}

/// Everything that can go wrong while performing a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The base URL or the search path could not be turned into a URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport failed to deliver the request or a response
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Non-200 answer without a JSON body
    #[error("{}", status_line(.status))]
    HttpStatus { status: StatusCode },

    /// Non-200 JSON answer whose body is not an error document
    #[error("{}; JSON response body malformed ({detail})", status_line(.status))]
    MalformedApiError { status: StatusCode, detail: String },

    /// Error document returned by the service
    #[error(transparent)]
    Api(#[from] ApiError),

    /// 200 answer that is not JSON
    #[error("Content-Type not JSON")]
    ContentType,

    /// Reading the response body failed
    #[error("failed to read response body: {0}")]
    Body(#[source] std::io::Error),

    /// The body is JSON but not a search result
    #[error("malformed search result: {0}")]
    Envelope(#[source] serde_json::Error),

    /// A hit carries no `type` to select its variant
    #[error("hit {index} has no type")]
    TypeMissing { index: usize },

    /// A hit could not be decoded into its variant
    #[error("failed to decode hit {index}: {source}")]
    HitDecode {
        index: usize,
        source: serde_json::Error,
    },
}

impl SearchError {
    /// The API error, if the service reported one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            SearchError::Api(api_error) => Some(api_error),
            _ => None,
        }
    }
}

/// A failed search together with the response gathered before the failure.
///
/// Displays exactly like the underlying `SearchError`.
#[derive(Debug)]
pub struct SearchFailure {
    error: SearchError,
    response: Option<Box<Response>>,
}

impl SearchFailure {
    pub(crate) fn new(error: SearchError, response: Option<Response>) -> Self {
        Self {
            error,
            response: response.map(Box::new),
        }
    }

    pub fn error(&self) -> &SearchError {
        &self.error
    }

    /// Response metadata and partial results, when the request got that far.
    pub fn response(&self) -> Option<&Response> {
        self.response.as_deref()
    }

    pub fn into_parts(self) -> (SearchError, Option<Response>) {
        (self.error, self.response.map(|response| *response))
    }
}

impl From<SearchError> for SearchFailure {
    fn from(error: SearchError) -> Self {
        Self::new(error, None)
    }
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for SearchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error.source()
    }
}

/// Formats a status as `"<code> <reason>"`, or just the code when the
/// status has no canonical reason phrase.
fn status_line(status: &StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Like `status_line`, for codes that may not be HTTP statuses at all.
fn code_line(code: &i64) -> String {
    u16::try_from(*code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .map(|status| status_line(&status))
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = ApiError {
            code: 418,
            message: "Foo message".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "catalog-search: HTTP 418 I'm a teapot: Foo message"
        );
    }

    #[test]
    fn test_api_error_without_reason_phrase() {
        let error = ApiError {
            code: 599,
            message: "Odd".to_string(),
        };
        assert_eq!(error.to_string(), "catalog-search: HTTP 599: Odd");
    }

    #[test]
    fn test_api_error_decoding_ignores_unknown_keys() {
        let error: ApiError = serde_json::from_str(
            r#"{"status":"error","code":400,"message":"Invalid parameters: site"}"#,
        )
        .unwrap();
        assert_eq!(error.code, 400);
        assert_eq!(error.message, "Invalid parameters: site");
    }

    #[test]
    fn test_api_error_with_application_codes() {
        for (body, code, message) in [
            (r#"{"code":-1,"message":"x"}"#, -1, "catalog-search: HTTP -1: x"),
            (r#"{"code":70000,"message":"x"}"#, 70000, "catalog-search: HTTP 70000: x"),
            (r#"{"code":99,"message":"x"}"#, 99, "catalog-search: HTTP 99: x"),
        ] {
            let error = ApiError::from_json(body.as_bytes()).unwrap();
            assert_eq!(error.code, code, "{body}");
            assert_eq!(error.to_string(), message);
        }
    }

    #[test]
    fn test_api_error_requires_an_object() {
        for body in ["[]", "[400, \"nope\"]", "\"error\"", "null", "400"] {
            assert!(ApiError::from_json(body.as_bytes()).is_err(), "{body}");
        }
    }

    #[test]
    fn test_api_error_null_keys_decode_to_defaults() {
        let error = ApiError::from_json(br#"{"code":null,"message":null}"#).unwrap();
        assert_eq!(error, ApiError::default());
    }

    #[test]
    fn test_api_error_falls_back_to_status() {
        let error = ApiError::from_json(br#"{"message":"nope"}"#).unwrap();
        let error = error.or_status(StatusCode::NOT_FOUND);
        assert_eq!(error.code, 404);

        let error = ApiError {
            code: 400,
            message: String::new(),
        }
        .or_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.code, 400);
    }

    #[test]
    fn test_status_errors_include_reason_phrase() {
        let error = SearchError::HttpStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(error.to_string(), "500 Internal Server Error");

        let error = SearchError::MalformedApiError {
            status: StatusCode::BAD_REQUEST,
            detail: "EOF while parsing".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "400 Bad Request; JSON response body malformed (EOF while parsing)"
        );
    }

    #[test]
    fn test_failure_displays_like_its_error() {
        let failure = SearchFailure::from(SearchError::ContentType);
        assert_eq!(failure.to_string(), "Content-Type not JSON");
        assert!(failure.response().is_none());
    }
}
