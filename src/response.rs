//! Search responses and their classification
//!
//! Every exchange ends in a `Response`, successful or not: it holds the
//! request/response metadata and, for successful searches, the decoded hits.
//! `classify` decides from status and content type whether a body is a
//! search result, an error document, or something to report as is.

use crate::error::{ApiError, SearchError, SearchFailure};
use crate::hit::{Hit, decode_hits};
use crate::transport::TransportResponse;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use std::io::{self, Read};
use tracing::{debug, warn};
use url::Url;

/// Bytes of an unread body drained before it is dropped.
const DRAIN_LIMIT: u64 = 64;

/// Request/response metadata.
#[derive(Debug, Clone)]
pub struct Meta {
    /// HTTP status, `None` when no response arrived
    pub status: Option<StatusCode>,
    pub headers: HeaderMap,
    /// The URL the request was sent to
    pub request_url: Url,
}

impl Meta {
    /// Metadata of a request that never got an answer.
    pub fn unanswered(request_url: Url) -> Self {
        Self {
            status: None,
            headers: HeaderMap::new(),
            request_url,
        }
    }
}

/// The result of a search.
#[derive(Debug, Clone)]
pub struct Response {
    /// Number of matches reported by the service, which may exceed the
    /// number of hits in this page
    pub total_hits: u64,
    /// Hits in the order the service returned them
    pub hits: Vec<Hit>,
    pub meta: Meta,
}

impl Response {
    pub fn new(meta: Meta) -> Self {
        Self {
            total_hits: 0,
            hits: Vec::new(),
            meta,
        }
    }
}

/// Returns whether the headers declare a JSON body.
///
/// Only the media type is compared; parameters such as `charset` are
/// ignored.
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|media_type| media_type.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Turns a transport response into a search `Response`.
///
/// The body is always released before returning. On failure the metadata
/// and any partial result travel with the error.
pub(crate) fn classify(
    request_url: Url,
    raw: TransportResponse,
) -> Result<Response, SearchFailure> {
    let TransportResponse {
        status,
        headers,
        mut body,
    } = raw;

    let mut response = Response::new(Meta {
        status: Some(status),
        headers,
        request_url,
    });

    let outcome = interpret(status, &mut response, &mut body);
    release(body);

    match outcome {
        Ok(()) => {
            debug!(
                total_hits = response.total_hits,
                hits = response.hits.len(),
                "decoded search response"
            );
            Ok(response)
        }
        Err(error) => {
            warn!(status = %status, error = %error, "search failed");
            Err(SearchFailure::new(error, Some(response)))
        }
    }
}

fn interpret(
    status: StatusCode,
    response: &mut Response,
    body: &mut dyn Read,
) -> Result<(), SearchError> {
    let json = is_json(&response.meta.headers);
    debug!(status = %status, json, "classifying search response");

    if status != StatusCode::OK {
        if !json {
            return Err(SearchError::HttpStatus { status });
        }

        let bytes = read_body(body)?;
        let api_error =
            ApiError::from_json(&bytes).map_err(|error| SearchError::MalformedApiError {
                status,
                detail: error.to_string(),
            })?;
        return Err(SearchError::Api(api_error.or_status(status)));
    }

    if !json {
        return Err(SearchError::ContentType);
    }

    let bytes = read_body(body)?;
    decode_hits(&bytes, response)
}

fn read_body(body: &mut dyn Read) -> Result<Vec<u8>, SearchError> {
    let mut bytes = Vec::new();
    body.read_to_end(&mut bytes).map_err(SearchError::Body)?;
    Ok(bytes)
}

/// Drains a bounded prefix of whatever is left of the body, then drops it.
fn release(mut body: Box<dyn Read + Send>) {
    let _ = io::copy(&mut body.by_ref().take(DRAIN_LIMIT), &mut io::sink());
}
