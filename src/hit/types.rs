//! Catalog entry types as returned by the search service.
//!
//! These structures mirror the JSON documents of the service. Groups of
//! fields that repeat across entry types (localized titles, descriptions,
//! artwork) are flattened structs, so the wire format stays flat while the
//! Rust side can share them. Missing and `null` fields decode to their
//! defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::HitSubset;

/// Deserializes a field, mapping an explicit `null` to the default value.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Deserialize::deserialize(d).map(|x: Option<T>| x.unwrap_or_default())
}

/// Tags bind otherwise unrelated entries.
pub type Tags = BTreeMap<String, Vec<String>>;

/// Titles in the four catalog languages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Titles {
    #[serde(rename = "title_da", deserialize_with = "null_as_default")]
    pub da: String,
    #[serde(rename = "title_fi", deserialize_with = "null_as_default")]
    pub fi: String,
    #[serde(rename = "title_nb", deserialize_with = "null_as_default")]
    pub nb: String,
    #[serde(rename = "title_sv", deserialize_with = "null_as_default")]
    pub sv: String,
}

impl Titles {
    /// Returns the title for a language code (`da`, `fi`, `nb`/`no`, `sv`),
    /// if present and not empty.
    pub fn localized(&self, language: &str) -> Option<&str> {
        let title = match language {
            "da" => &self.da,
            "fi" => &self.fi,
            "nb" | "no" => &self.nb,
            "sv" => &self.sv,
            _ => return None,
        };
        (!title.is_empty()).then_some(title.as_str())
    }

    /// Returns the title for `language`, falling back to the first
    /// non-empty title in the order sv, nb, da, fi.
    pub fn preferred(&self, language: &str) -> Option<&str> {
        self.localized(language).or_else(|| {
            ["sv", "nb", "da", "fi"]
                .into_iter()
                .find_map(|fallback| self.localized(fallback))
        })
    }
}

/// Descriptions of varying length in the four catalog languages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Descriptions {
    #[serde(rename = "description_extended_da", deserialize_with = "null_as_default")]
    pub extended_da: String,
    #[serde(rename = "description_extended_fi", deserialize_with = "null_as_default")]
    pub extended_fi: String,
    #[serde(rename = "description_extended_nb", deserialize_with = "null_as_default")]
    pub extended_nb: String,
    #[serde(rename = "description_extended_sv", deserialize_with = "null_as_default")]
    pub extended_sv: String,
    #[serde(rename = "description_long_da", deserialize_with = "null_as_default")]
    pub long_da: String,
    #[serde(rename = "description_long_fi", deserialize_with = "null_as_default")]
    pub long_fi: String,
    #[serde(rename = "description_long_nb", deserialize_with = "null_as_default")]
    pub long_nb: String,
    #[serde(rename = "description_long_sv", deserialize_with = "null_as_default")]
    pub long_sv: String,
    #[serde(rename = "description_medium_da", deserialize_with = "null_as_default")]
    pub medium_da: String,
    #[serde(rename = "description_medium_fi", deserialize_with = "null_as_default")]
    pub medium_fi: String,
    #[serde(rename = "description_medium_nb", deserialize_with = "null_as_default")]
    pub medium_nb: String,
    #[serde(rename = "description_medium_sv", deserialize_with = "null_as_default")]
    pub medium_sv: String,
    #[serde(rename = "description_short_da", deserialize_with = "null_as_default")]
    pub short_da: String,
    #[serde(rename = "description_short_fi", deserialize_with = "null_as_default")]
    pub short_fi: String,
    #[serde(rename = "description_short_nb", deserialize_with = "null_as_default")]
    pub short_nb: String,
    #[serde(rename = "description_short_sv", deserialize_with = "null_as_default")]
    pub short_sv: String,
    #[serde(rename = "description_tiny_da", deserialize_with = "null_as_default")]
    pub tiny_da: String,
    #[serde(rename = "description_tiny_fi", deserialize_with = "null_as_default")]
    pub tiny_fi: String,
    #[serde(rename = "description_tiny_nb", deserialize_with = "null_as_default")]
    pub tiny_nb: String,
    #[serde(rename = "description_tiny_sv", deserialize_with = "null_as_default")]
    pub tiny_sv: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreDescriptions {
    #[serde(rename = "genre_description_da", deserialize_with = "null_as_default")]
    pub da: String,
    #[serde(rename = "genre_description_fi", deserialize_with = "null_as_default")]
    pub fi: String,
    #[serde(rename = "genre_description_nb", deserialize_with = "null_as_default")]
    pub nb: String,
    #[serde(rename = "genre_description_sv", deserialize_with = "null_as_default")]
    pub sv: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    #[serde(rename = "keywords_da", deserialize_with = "null_as_default")]
    pub da: Vec<Keyword>,
    #[serde(rename = "keywords_fi", deserialize_with = "null_as_default")]
    pub fi: Vec<Keyword>,
    #[serde(rename = "keywords_nb", deserialize_with = "null_as_default")]
    pub nb: Vec<Keyword>,
    #[serde(rename = "keywords_sv", deserialize_with = "null_as_default")]
    pub sv: Vec<Keyword>,
}

/// The image set of an entry, one image per aspect ratio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artwork {
    #[serde(deserialize_with = "null_as_default")]
    pub cinemascope: Image,
    #[serde(deserialize_with = "null_as_default")]
    pub fifteen_by_seven: Image,
    #[serde(deserialize_with = "null_as_default")]
    pub four_by_three: Image,
    #[serde(deserialize_with = "null_as_default")]
    pub landscape: Image,
    #[serde(deserialize_with = "null_as_default")]
    pub poster: Image,
}

/// League names of a sports asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueNames {
    #[serde(rename = "league_da", deserialize_with = "null_as_default")]
    pub da: String,
    #[serde(rename = "league_fi", deserialize_with = "null_as_default")]
    pub fi: String,
    #[serde(rename = "league_nb", deserialize_with = "null_as_default")]
    pub nb: String,
    #[serde(rename = "league_sv", deserialize_with = "null_as_default")]
    pub sv: String,
}

/// Attributes shared by every kind of search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFields {
    #[serde(flatten)]
    pub titles: Titles,
    #[serde(flatten)]
    pub descriptions: Descriptions,
    #[serde(flatten)]
    pub genre_descriptions: GenreDescriptions,
    #[serde(flatten)]
    pub keywords: Keywords,
    #[serde(flatten)]
    pub artwork: Artwork,
    #[serde(deserialize_with = "null_as_default")]
    pub content_source: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub credits: Vec<Credit>,
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
    #[serde(deserialize_with = "null_as_default")]
    pub external_references: Vec<ExternalReference>,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(deserialize_with = "null_as_default")]
    pub spoken_languages: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub studio: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Tags,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
}

/// A single playable item: an episode, a movie or a live event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    #[serde(skip)]
    pub(super) subset: OnceLock<HitSubset>,

    /// Discriminator, e.g. `episode`, `movie` or `sport`
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub video_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vman_id: String,

    #[serde(flatten)]
    pub fields: CatalogFields,

    #[serde(deserialize_with = "null_as_default")]
    pub brand: Brand,
    #[serde(deserialize_with = "null_as_default")]
    pub season: Season,
    #[serde(deserialize_with = "null_as_default")]
    pub episode_number: u32,
    /// Duration in seconds
    #[serde(deserialize_with = "null_as_default")]
    pub duration: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub drm_restrictions: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub items_published: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub mlt_nids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub original_title: OriginalTitle,
    #[serde(deserialize_with = "null_as_default")]
    pub parental_ratings: Vec<ParentalRating>,
    #[serde(deserialize_with = "null_as_default")]
    pub production_year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub publication_rights: PublicationRights,

    #[serde(deserialize_with = "null_as_default")]
    pub arena: String,
    #[serde(rename = "awayteam", deserialize_with = "null_as_default")]
    pub away_team: Team,
    #[serde(rename = "hometeam", deserialize_with = "null_as_default")]
    pub home_team: Team,
    #[serde(rename = "logoawayteam", deserialize_with = "null_as_default")]
    pub logo_away_team: Image,
    #[serde(rename = "logohometeam", deserialize_with = "null_as_default")]
    pub logo_home_team: Image,
    #[serde(deserialize_with = "null_as_default")]
    pub league: String,
    #[serde(flatten)]
    pub league_names: LeagueNames,
    #[serde(deserialize_with = "null_as_default")]
    pub live: bool,
    pub live_event_end: Option<DateTime<Utc>>,
}

/// A container of seasons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Series {
    #[serde(skip)]
    pub(super) subset: OnceLock<HitSubset>,

    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub brand_id: String,

    #[serde(flatten)]
    pub fields: CatalogFields,

    /// Season numbers available for the series
    #[serde(deserialize_with = "null_as_default")]
    pub seasons: Vec<u32>,
}

/// The brand of an asset, e.g. Idol or Harry Potter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(flatten)]
    pub titles: Titles,
    #[serde(flatten)]
    pub descriptions: Descriptions,
    #[serde(flatten)]
    pub genre_descriptions: GenreDescriptions,
    #[serde(flatten)]
    pub artwork: Artwork,
    #[serde(deserialize_with = "null_as_default")]
    pub country: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub external_references: Vec<ExternalReference>,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(deserialize_with = "null_as_default")]
    pub studio: String,
}

/// A season of a brand, e.g. "Idol season 2".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "season_number", deserialize_with = "null_as_default")]
    pub number: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_episodes: u32,
    #[serde(flatten)]
    pub titles: Titles,
    #[serde(flatten)]
    pub descriptions: Descriptions,
    #[serde(flatten)]
    pub genre_descriptions: GenreDescriptions,
    #[serde(flatten)]
    pub artwork: Artwork,
    #[serde(deserialize_with = "null_as_default")]
    pub country: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub external_references: Vec<ExternalReference>,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(deserialize_with = "null_as_default")]
    pub studio: String,
}

/// One entry in the credit list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credit {
    #[serde(deserialize_with = "null_as_default")]
    pub function: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rolename: String,
}

/// A publication window of an entry on a site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub site: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_types: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub products: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub publish_time: Option<DateTime<Utc>>,
}

/// A reference to information held by another system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalReference {
    #[serde(deserialize_with = "null_as_default")]
    pub locator: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// Main genre and sub genres, e.g. Horror with Action, Drama and Romance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    #[serde(deserialize_with = "null_as_default")]
    pub main: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub: Vec<String>,
}

/// An image, possibly with localized variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(deserialize_with = "null_as_default")]
    pub copyright: String,
    #[serde(deserialize_with = "null_as_default")]
    pub localizations: Vec<LocalizedImage>,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizedImage {
    #[serde(deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(deserialize_with = "null_as_default")]
    pub copyright: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// A URL friendly id and a human friendly text for a keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keyword {
    #[serde(deserialize_with = "null_as_default")]
    pub nid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRestrictions {
    #[serde(deserialize_with = "null_as_default")]
    pub include_countries: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRights {
    #[serde(deserialize_with = "null_as_default")]
    pub location_restrictions: LocationRestrictions,
    #[serde(deserialize_with = "null_as_default")]
    pub product: String,
}

/// Title of an entry in its original language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginalTitle {
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
}

/// Parental rating for a country and rating system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParentalRating {
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub system: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationRights {
    #[serde(deserialize_with = "null_as_default")]
    pub location_rights: LocationRights,
}

/// A team of a sports asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nid: String,
}
