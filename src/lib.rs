//! catalog-search - Client for the media catalog search service
//!
//! This library queries the search service for catalog entries (episodes,
//! movies, live events, series) and decodes the mixed list of hits it
//! returns into typed values.
//!
//! # Usage
//!
//! ```no_run
//! use catalog_search::{Client, QueryValues};
//!
//! let client = Client::new().unwrap();
//!
//! let query = QueryValues::from([
//!     ("device_type", "tve_web"),
//!     ("lang", "sv"),
//!     ("site", "cmore.se"),
//!     ("brand_id", "34515"),
//!     ("season", "1"),
//!     ("sort_by", "episode_number"),
//!     ("order", "asc"),
//!     ("page_size", "3"),
//! ]);
//!
//! match client.search(query, []) {
//!     Ok(response) => {
//!         for hit in &response.hits {
//!             if let Some(asset) = hit.as_asset() {
//!                 println!(
//!                     "{} S{:02}E{:02}",
//!                     asset.brand.titles.sv, asset.season.number, asset.episode_number
//!                 );
//!             }
//!         }
//!     }
//!     Err(failure) => eprintln!("{}", failure),
//! }
//! ```
//!
//! Failed searches return a [`SearchFailure`]. Besides the [`SearchError`] it
//! keeps the partial [`Response`], so status, headers and request URL stay
//! available for diagnostics.

mod client;
mod error;
pub mod hit;
mod query;
mod request;
mod response;
mod transport;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{ApiError, SearchError, SearchFailure};
pub use query::{DISCRIMINATOR_FIELD, FIELDS_PARAM, QueryValues, SearchQuery};
pub use request::{
    REQUEST_ID_HEADER, RequestOption, SEARCH_PATH, SearchRequest, set_request_id, set_timeout,
};
pub use response::{Meta, Response, is_json};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};

pub use hit::{Hit, HitSubset};
