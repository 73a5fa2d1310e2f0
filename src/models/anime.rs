use serde::{Deserialize, Serialize};

/// Structured metadata for one anime, as returned by the metadata service.
///
/// Any field may be absent upstream, so everything is optional or an
/// (ordered) list that may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub external_id: Option<i32>,
    pub title: AnimeTitle,
    pub description: Option<String>,
    pub average_score: Option<i32>,
    pub start_date: FuzzyDate,
    pub end_date: FuzzyDate,
    pub genres: Vec<String>,
    pub status: Option<String>,
    pub episode_count: Option<i32>,
    pub duration: Option<i32>,
    pub format: Option<String>,
    pub cover_image: CoverImage,
    pub banner_image: Option<String>,
    pub season: Option<String>,
    pub season_year: Option<i32>,
    pub studios: Vec<String>,
}

impl MetadataRecord {
    /// Largest available cover image.
    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        self.cover_image
            .extra_large
            .as_deref()
            .or(self.cover_image.large.as_deref())
    }

    /// Start year, falling back to the season year.
    #[must_use]
    pub const fn year(&self) -> Option<i32> {
        match self.start_date.year {
            Some(year) => Some(year),
            None => self.season_year,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub user_preferred: Option<String>,
}

/// Partial calendar date; the service often knows only the year or month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub large: Option<String>,
    pub extra_large: Option<String>,
}
