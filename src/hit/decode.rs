//! Decoding of the heterogeneous hit list.
//!
//! The service does not tag entries with a schema, so every entry is read
//! twice: once for its `type` and once into the variant that type selects.

use super::{Asset, Hit, Series};
use crate::error::SearchError;
use crate::response::Response;
use serde::Deserialize;
use serde_json::Value;

/// Discriminator value of series entries.
pub const SERIES_KIND: &str = "series";

/// Top-level document of a successful search.
#[derive(Debug, Deserialize)]
struct Envelope {
    total_hits: Option<u64>,
    assets: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct Discriminator {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Decodes a search result body into `response`.
///
/// `total_hits` is stored before any hit is decoded, so it survives a
/// failing entry. Hits are only stored when every entry decoded.
pub(crate) fn decode_hits(body: &[u8], response: &mut Response) -> Result<(), SearchError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(SearchError::Envelope)?;
    response.total_hits = envelope.total_hits.unwrap_or_default();

    let entries = envelope.assets.unwrap_or_default();
    let mut hits = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        hits.push(decode_hit(index, entry)?);
    }

    response.hits = hits;
    Ok(())
}

/// Decodes a single entry of the hit list.
///
/// Entries without a `type`, or with an empty one, are rejected. Unknown
/// types decode as assets.
pub fn decode_hit(index: usize, entry: Value) -> Result<Hit, SearchError> {
    let discriminator = Discriminator::deserialize(&entry)
        .map_err(|source| SearchError::HitDecode { index, source })?;

    match discriminator.kind.as_deref() {
        None | Some("") => Err(SearchError::TypeMissing { index }),
        Some(SERIES_KIND) => serde_json::from_value::<Series>(entry)
            .map(Hit::from)
            .map_err(|source| SearchError::HitDecode { index, source }),
        Some(_) => serde_json::from_value::<Asset>(entry)
            .map(Hit::from)
            .map_err(|source| SearchError::HitDecode { index, source }),
    }
}
