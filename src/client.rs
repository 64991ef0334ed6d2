//! The search client
//!
//! `Client` owns the base URL, the transport and an optional logger, and
//! composes query encoding, request building, dispatch and response
//! classification into a single `search` call.

use crate::error::{SearchError, SearchFailure};
use crate::query::{DISCRIMINATOR_FIELD, FIELDS_PARAM, QueryValues};
use crate::request::{RequestOption, SearchRequest};
use crate::response::{Meta, Response, classify};
use crate::transport::{ReqwestTransport, Transport};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://cmore-search.b17g.services/";

/// User agent of the built-in transport.
pub const DEFAULT_USER_AGENT: &str = concat!("catalog-search/", env!("CARGO_PKG_VERSION"));

type Logger = Arc<dyn Fn(&str) + Send + Sync>;

/// A client for the search service.
///
/// The client holds no per-request state and can be shared between threads.
pub struct Client {
    base_url: Url,
    transport: Box<dyn Transport>,
    logger: Option<Logger>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self, SearchError> {
        Self::builder().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Performs a search.
    ///
    /// When the query names the fields to return, `type` is added to them so
    /// hits can always be decoded. `options` then run in order on the built
    /// request.
    ///
    /// # Errors
    ///
    /// Returns a `SearchFailure` describing what went wrong. Unless the URL
    /// could not be built, it carries a `Response` with the request URL and
    /// whatever status, headers and total hit count were received.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use catalog_search::{Client, SearchQuery, set_request_id};
    ///
    /// let client = Client::new().unwrap();
    /// let query = SearchQuery {
    ///     device_type: "tve_web".to_string(),
    ///     language: "sv".to_string(),
    ///     site: "cmore.se".to_string(),
    ///     brand_id: "34515".to_string(),
    ///     ..Default::default()
    /// };
    ///
    /// match client.search(query, [set_request_id("abc-123")]) {
    ///     Ok(response) => println!("{} hits", response.total_hits),
    ///     Err(failure) => eprintln!("search failed: {}", failure),
    /// }
    /// ```
    pub fn search<Q, I>(&self, query: Q, options: I) -> Result<Response, SearchFailure>
    where
        Q: Into<QueryValues>,
        I: IntoIterator<Item = RequestOption>,
    {
        let mut query = query.into();
        query.ensure_field_token(FIELDS_PARAM, DISCRIMINATOR_FIELD);

        let mut request = SearchRequest::new(&self.base_url, &query)?;
        for option in options {
            option(&mut request);
        }

        let request_url = request.url().clone();
        debug!(url = %request_url, "GET");
        self.log(&format!("GET {request_url}"));

        let raw = match self.transport.execute(request) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(url = %request_url, error = %error, "search request failed");
                let response = Response::new(Meta::unanswered(request_url));
                return Err(SearchFailure::new(error.into(), Some(response)));
            }
        };

        classify(request_url, raw)
    }

    fn log(&self, line: &str) {
        if let Some(logger) = &self.logger {
            logger(line);
        }
    }
}

/// Configures and builds a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    transport: Option<Box<dyn Transport>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    logger: Option<Logger>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Sets the URL of the search service. Its path is kept as a prefix of
    /// the search endpoint.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Uses a custom transport instead of the built-in `reqwest` one.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Overall timeout of the built-in transport. Has no effect together
    /// with a custom transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// User agent of the built-in transport.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Receives one line per request, such as `GET https://...`.
    pub fn logger(mut self, logger: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn build(self) -> Result<Client, SearchError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url =
            Url::parse(raw).map_err(|error| SearchError::InvalidUrl(format!("{raw}: {error}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidUrl(format!(
                "{raw} cannot be used as a base URL"
            )));
        }

        let transport: Box<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
                Box::new(ReqwestTransport::build(user_agent, self.timeout)?)
            }
        };

        Ok(Client {
            base_url,
            transport,
            logger: self.logger,
        })
    }
}
