use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::limits::MAX_GENRES;
use crate::constants::sentinel::{NO_POSTER, NO_RANK};
use crate::domain::CanonicalId;
use crate::models::anime::MetadataRecord;
use crate::parser::identifier;

/// One scraped listing node before enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub title: String,
    pub raw_link: String,
    /// Optional per-layout fields such as `rank`, `time`, `episode`, `thumbnail`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl RawItem {
    #[must_use]
    pub fn new(title: impl Into<String>, raw_link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            raw_link: raw_link.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Records an optional field; empty values are dropped.
    #[must_use]
    pub fn with_extra(mut self, key: &str, value: Option<String>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.extra.insert(key.to_string(), value);
        }
        self
    }

    #[must_use]
    pub fn canonical_id(&self) -> CanonicalId {
        identifier::resolve(&self.raw_link)
    }
}

/// A [`RawItem`] with a flattened subset of its metadata.
///
/// Built for every item that enters enrichment. When no metadata was found
/// the metadata fields hold sentinels: `poster = "N/A"`, `banner = ""`, and
/// `null` for `score`, `year` and `externalId`. Extras named like one of the
/// fields are dropped so every key serializes once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedItem {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub raw_link: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
    pub poster: String,
    pub banner: String,
    pub score: Option<i32>,
    pub year: Option<i32>,
    pub external_id: Option<i32>,
    pub genres: Vec<String>,
}

impl EnrichedItem {
    /// Serialized names of the non-flattened fields.
    const FIELDS: [&'static str; 10] = [
        "id",
        "slug",
        "title",
        "rawLink",
        "poster",
        "banner",
        "score",
        "year",
        "externalId",
        "genres",
    ];

    #[must_use]
    pub fn from_lookup(item: RawItem, metadata: Option<MetadataRecord>) -> Self {
        let canonical = item.canonical_id();
        let mut extra = item.extra;
        extra.retain(|key, _| !Self::FIELDS.contains(&key.as_str()));
        let mut enriched = Self {
            id: canonical.numeric_id,
            slug: canonical.slug,
            title: item.title,
            raw_link: item.raw_link,
            extra,
            poster: NO_POSTER.to_string(),
            banner: String::new(),
            score: None,
            year: None,
            external_id: None,
            genres: Vec::new(),
        };

        if let Some(record) = metadata {
            if let Some(poster) = record.poster() {
                enriched.poster = poster.to_string();
            }
            enriched.banner = record.banner_image.clone().unwrap_or_default();
            enriched.score = record.average_score;
            enriched.year = record.year();
            enriched.external_id = record.external_id;
            enriched.genres = record.genres.into_iter().take(MAX_GENRES).collect();
        }

        enriched
    }

    #[must_use]
    pub const fn is_enriched(&self) -> bool {
        self.external_id.is_some()
    }
}

/// Entry in a franchise (season/part) grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseEntry {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub score: Option<i32>,
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<i32>,
}

impl From<EnrichedItem> for FranchiseEntry {
    fn from(item: EnrichedItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            poster: item.poster,
            score: item.score,
            year: item.year,
            external_id: item.external_id,
        }
    }
}

/// Ranked entry from the home page lists (trending and sidebars).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub rank: String,
}

impl From<RawItem> for CatalogEntry {
    fn from(item: RawItem) -> Self {
        let canonical = item.canonical_id();
        let rank = item
            .extra
            .get("rank")
            .cloned()
            .unwrap_or_else(|| NO_RANK.to_string());

        Self {
            id: canonical.numeric_id,
            slug: canonical.slug,
            title: item.title,
            rank,
        }
    }
}

/// Value of a detail-page info row: one value, or several in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Single(String),
    List(Vec<String>),
}

impl InfoValue {
    /// Collapses a one-element list to a scalar. Empty lists yield `None`.
    #[must_use]
    pub fn from_values(mut values: Vec<String>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(Self::Single),
            _ => Some(Self::List(values)),
        }
    }
}

/// Parsed anime detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetail {
    pub title: String,
    pub raw_link: String,
    pub poster: Option<String>,
    pub description: Option<String>,
    pub info: BTreeMap<String, InfoValue>,
}
