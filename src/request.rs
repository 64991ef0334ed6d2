//! Search request construction
//!
//! Builds the `GET {base}/search?{query}` request and lets callers adjust it
//! through request options before it is handed to the transport.

use crate::error::SearchError;
use crate::query::QueryValues;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Path of the search endpoint, relative to the base URL path.
pub const SEARCH_PATH: &str = "/search";

/// Header carrying the caller's request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A mutation applied to a request before it is sent.
pub type RequestOption = Box<dyn FnOnce(&mut SearchRequest) + Send>;

/// A search request ready to be executed by a transport.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    url: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl SearchRequest {
    /// Builds the request for `base_url` with the encoded `query`.
    pub(crate) fn new(base_url: &Url, query: &QueryValues) -> Result<Self, SearchError> {
        let mut url = search_url(base_url)?;
        let encoded = query.encode();
        url.set_query((!encoded.is_empty()).then_some(encoded.as_str()));

        Ok(Self {
            url,
            headers: HeaderMap::new(),
            timeout: None,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Deadline for the whole exchange, if the caller set one.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Splits the request into URL, headers and timeout.
    pub fn into_parts(self) -> (Url, HeaderMap, Option<Duration>) {
        (self.url, self.headers, self.timeout)
    }
}

/// Sets the `X-Request-Id` header on the search request.
///
/// Ids that are not valid header values are skipped with a warning.
pub fn set_request_id(request_id: impl Into<String>) -> RequestOption {
    let request_id = request_id.into();
    Box::new(move |request: &mut SearchRequest| {
        match HeaderValue::from_str(&request_id) {
            Ok(value) => {
                request
                    .headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }
            Err(_) => warn!(request_id = %request_id, "ignoring invalid request id"),
        }
    })
}

/// Limits how long the transport may spend on the request.
pub fn set_timeout(timeout: Duration) -> RequestOption {
    Box::new(move |request: &mut SearchRequest| request.set_timeout(timeout))
}

/// Resolves the search endpoint against the base URL.
///
/// The search path is joined onto the base path, so a base of
/// `http://host/api/` yields `http://host/api/search`. Query and fragment of
/// the base are dropped.
pub(crate) fn search_url(base_url: &Url) -> Result<Url, SearchError> {
    if base_url.cannot_be_a_base() {
        return Err(SearchError::InvalidUrl(format!(
            "{base_url} cannot be used as a base URL"
        )));
    }

    let mut url = base_url.clone();
    url.set_path(&join_path(base_url.path(), SEARCH_PATH));
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Joins two URL paths, collapsing repeated slashes and resolving dot
/// segments. The result always starts with `/`.
fn join_path(base: &str, tail: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(tail.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}
