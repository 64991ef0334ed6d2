//! HTTP transport used to execute search requests
//!
//! The client does not talk to the network itself. It hands a prepared
//! `SearchRequest` to a `Transport` and classifies whatever comes back.
//! `ReqwestTransport` is the default; tests and callers with special needs
//! can plug in their own, including a plain closure.

use crate::request::SearchRequest;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while delivering a request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete before its deadline
    #[error("request timed out")]
    Timeout,

    /// The HTTP client failed (connection, TLS, redirect loop, ...)
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Failure reported by a custom transport
    #[error("{0}")]
    Custom(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Request(error)
        }
    }
}

/// The raw answer of a transport: status line, headers and an unread body.
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Box<dyn Read + Send>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Box::new(body),
        }
    }

    /// Adds a header, e.g. `Content-Type`.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Something that can execute a search request.
///
/// Implementations must be safe to share between threads; the client calls
/// `execute` from whichever thread performs the search. A request timeout,
/// when set, must be honored and reported as `TransportError::Timeout`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: SearchRequest) -> Result<TransportResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(SearchRequest) -> Result<TransportResponse, TransportError> + Send + Sync,
{
    fn execute(&self, request: SearchRequest) -> Result<TransportResponse, TransportError> {
        self(request)
    }
}

/// Transport backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Wraps an existing client, keeping its configuration.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    /// Builds a client with the given user agent and an optional overall
    /// timeout. Without a timeout requests may block indefinitely.
    pub fn build(user_agent: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: SearchRequest) -> Result<TransportResponse, TransportError> {
        let (url, headers, timeout) = request.into_parts();

        let mut builder = self.client.get(url).headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send()?;

        Ok(TransportResponse {
            status: response.status(),
            headers: response.headers().clone(),
            body: Box::new(response),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryValues;
    use reqwest::header::CONTENT_TYPE;
    use std::io::Cursor;
    use url::Url;

    #[test]
    fn test_closure_transport() {
        let transport = |request: SearchRequest| {
            assert_eq!(request.url().path(), "/search");
            Ok::<_, TransportError>(TransportResponse::new(
                StatusCode::NO_CONTENT,
                Cursor::new(Vec::new()),
            ))
        };

        let base = Url::parse("http://example.com/").unwrap();
        let request = SearchRequest::new(&base, &QueryValues::new()).unwrap();
        let response = transport.execute(request).unwrap();
        assert_eq!(response.status, StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_with_header_appends() {
        let response = TransportResponse::new(StatusCode::OK, Cursor::new(Vec::new()))
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert_eq!(response.headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_build_reqwest_transport() {
        assert!(ReqwestTransport::build("catalog-search/test", Some(Duration::from_secs(5))).is_ok());
        assert!(ReqwestTransport::build("catalog-search/test", None).is_ok());
    }
}
