//! Search hits and their decoding.
//!
//! A search returns a mixed list of catalog entries. Each entry names its
//! kind in a `type` field; `series` entries decode as [`Series`], everything
//! else as [`Asset`]. Both expose the attributes they share through
//! [`Hit::subset`].
mod decode;
mod types;

pub(crate) use decode::decode_hits;
pub(crate) use types::null_as_default;
pub use decode::{SERIES_KIND, decode_hit};
pub use types::{
    Artwork, Asset, Brand, CatalogFields, Credit, Descriptions, Event, ExternalReference, Genre,
    GenreDescriptions, Image, Keyword, Keywords, LeagueNames, LocalizedImage, LocationRestrictions,
    LocationRights, OriginalTitle, ParentalRating, PublicationRights, Season, Series, Tags, Team,
    Titles,
};

use serde::Serialize;

/// The attributes common to every kind of hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HitSubset {
    /// Video id of an asset, brand id of a series
    pub id: String,
    /// The hit's discriminator
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: CatalogFields,
}

/// A single search hit.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Hit {
    Asset(Box<Asset>),
    Series(Box<Series>),
}

impl Hit {
    /// The shared attributes of the hit, computed once and cached.
    pub fn subset(&self) -> &HitSubset {
        match self {
            Hit::Asset(asset) => asset.subset(),
            Hit::Series(series) => series.subset(),
        }
    }

    /// The discriminator the hit was decoded with.
    pub fn kind(&self) -> &str {
        match self {
            Hit::Asset(asset) => &asset.kind,
            Hit::Series(series) => &series.kind,
        }
    }

    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            Hit::Asset(asset) => Some(asset),
            Hit::Series(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&Series> {
        match self {
            Hit::Series(series) => Some(series),
            Hit::Asset(_) => None,
        }
    }
}

impl From<Asset> for Hit {
    fn from(asset: Asset) -> Self {
        Hit::Asset(Box::new(asset))
    }
}

impl From<Series> for Hit {
    fn from(series: Series) -> Self {
        Hit::Series(Box::new(series))
    }
}

impl Asset {
    /// The shared attributes of the asset, identified by its video id.
    pub fn subset(&self) -> &HitSubset {
        self.subset.get_or_init(|| HitSubset {
            id: self.video_id.clone(),
            kind: self.kind.clone(),
            fields: self.fields.clone(),
        })
    }
}

impl Series {
    /// The shared attributes of the series, identified by its brand id.
    pub fn subset(&self) -> &HitSubset {
        self.subset.get_or_init(|| HitSubset {
            id: self.brand_id.clone(),
            kind: self.kind.clone(),
            fields: self.fields.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn asset() -> Asset {
        Asset {
            video_id: "video-id-123".to_string(),
            kind: "movie".to_string(),
            ..Default::default()
        }
    }

    fn series() -> Series {
        Series {
            brand_id: "brand-id-345".to_string(),
            kind: "series".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_asset_subset_fields() {
        let asset = asset();
        let subset = asset.subset();
        assert_eq!(subset.id, "video-id-123");
        assert_eq!(subset.kind, "movie");
    }

    #[test]
    fn test_asset_subset_is_cached() {
        let asset = asset();
        let first = asset.subset();
        let second = asset.subset();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_series_subset_fields() {
        let series = series();
        let subset = series.subset();
        assert_eq!(subset.id, "brand-id-345");
        assert_eq!(subset.kind, "series");
    }

    #[test]
    fn test_series_subset_is_cached() {
        let series = series();
        assert!(std::ptr::eq(series.subset(), series.subset()));
    }

    #[test]
    fn test_hit_accessors() {
        let hit = Hit::from(asset());
        assert_eq!(hit.kind(), "movie");
        assert!(hit.as_asset().is_some());
        assert!(hit.as_series().is_none());
        assert!(std::ptr::eq(hit.subset(), hit.as_asset().unwrap().subset()));

        let hit = Hit::from(series());
        assert_eq!(hit.subset().id, "brand-id-345");
        assert!(hit.as_series().is_some());
    }

    #[test]
    fn test_subset_first_access_from_many_threads() {
        let hit = Arc::new(Hit::from(asset()));
        let addresses: Vec<usize> = (0..4)
            .map(|_| {
                let hit = Arc::clone(&hit);
                thread::spawn(move || hit.subset() as *const HitSubset as usize)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
