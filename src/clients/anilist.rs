use async_trait::async_trait;
use metrics::counter;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::MetadataConfig;
use crate::models::anime::{AnimeTitle, CoverImage, FuzzyDate, MetadataRecord};

const MEDIA_QUERY: &str = r"
    query ($id: Int, $search: String) {
        Media(id: $id, search: $search, type: ANIME) {
            id
            title { romaji english userPreferred }
            description(asHtml: false)
            averageScore
            startDate { year month day }
            endDate { year month day }
            genres
            status
            episodes
            duration
            format
            coverImage { large extraLarge }
            bannerImage
            season
            seasonYear
            studios(isMain: true) {
                nodes { name }
            }
        }
    }
";

/// Why a metadata lookup produced no record.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Metadata request failed: {0}")]
    Transport(String),

    #[error("Metadata request timed out")]
    Timeout,

    #[error("Metadata service returned HTTP {0}")]
    Status(u16),

    #[error("Metadata query rejected: {0}")]
    GraphQl(String),

    #[error("Malformed metadata response: {0}")]
    Malformed(String),

    #[error("No metadata match")]
    NoMatch,
}

impl MetadataError {
    /// Metric label for this failure.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Timeout => "timeout",
            Self::Status(_) => "status",
            Self::GraphQl(_) => "graphql",
            Self::Malformed(_) => "malformed",
            Self::NoMatch => "no_match",
        }
    }
}

impl From<reqwest::Error> for MetadataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Source of [`MetadataRecord`]s.
///
/// Implementors provide the fallible `fetch_*` forms. The `lookup_*` forms
/// log the reason for a miss, count the outcome and fold every failure into
/// `None`; pipeline code only calls those.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    async fn fetch_by_title(&self, title: &str) -> Result<MetadataRecord, MetadataError>;

    async fn fetch_by_id(&self, id: i32) -> Result<MetadataRecord, MetadataError>;

    async fn lookup_by_title(&self, title: &str) -> Option<MetadataRecord> {
        collapse(self.fetch_by_title(title).await, "title", title)
    }

    async fn lookup_by_id(&self, id: i32) -> Option<MetadataRecord> {
        collapse(self.fetch_by_id(id).await, "id", &id.to_string())
    }
}

fn collapse(
    result: Result<MetadataRecord, MetadataError>,
    by: &'static str,
    query: &str,
) -> Option<MetadataRecord> {
    match result {
        Ok(record) => {
            counter!("anidex_metadata_lookups_total", "outcome" => "hit").increment(1);
            Some(record)
        }
        Err(e) => {
            counter!("anidex_metadata_lookups_total", "outcome" => e.outcome()).increment(1);
            if matches!(e, MetadataError::NoMatch) {
                debug!(by, query, "no metadata match");
            } else {
                warn!(by, query, error = %e, "metadata lookup failed");
            }
            None
        }
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: MediaVariables<'a>,
}

#[derive(Serialize)]
struct MediaVariables<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<Data>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Deserialize)]
struct Data {
    #[serde(rename = "Media")]
    media: Option<Media>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Media {
    id: i32,
    title: Option<AnimeTitle>,
    description: Option<String>,
    average_score: Option<i32>,
    start_date: Option<FuzzyDate>,
    end_date: Option<FuzzyDate>,
    genres: Option<Vec<String>>,
    status: Option<String>,
    episodes: Option<i32>,
    duration: Option<i32>,
    format: Option<String>,
    cover_image: Option<CoverImage>,
    banner_image: Option<String>,
    season: Option<String>,
    season_year: Option<i32>,
    studios: Option<Studios>,
}

#[derive(Deserialize)]
struct Studios {
    nodes: Vec<StudioNode>,
}

#[derive(Deserialize)]
struct StudioNode {
    name: String,
}

/// Strips the markup `AniList` leaves in plain-text descriptions.
fn clean_description(raw: &str) -> Option<String> {
    static BREAK: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();
    let br = BREAK.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>").expect("Invalid regex pattern defined in code")
    });
    let tag = TAG
        .get_or_init(|| Regex::new(r"<[^>]+>").expect("Invalid regex pattern defined in code"));

    let text = br.replace_all(raw, "\n");
    let text = tag.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn map_media(m: Media) -> MetadataRecord {
    MetadataRecord {
        external_id: Some(m.id),
        title: m.title.unwrap_or_default(),
        description: m.description.as_deref().and_then(clean_description),
        average_score: m.average_score,
        start_date: m.start_date.unwrap_or_default(),
        end_date: m.end_date.unwrap_or_default(),
        genres: m.genres.unwrap_or_default(),
        status: m.status,
        episode_count: m.episodes,
        duration: m.duration,
        format: m.format,
        cover_image: m.cover_image.unwrap_or_default(),
        banner_image: m.banner_image,
        season: m.season,
        season_year: m.season_year,
        studios: m
            .studios
            .map(|s| s.nodes.into_iter().map(|n| n.name).collect())
            .unwrap_or_default(),
    }
}

/// Turns a raw HTTP reply into a record or a classified failure.
fn parse_media_response(status: u16, body: &str) -> Result<MetadataRecord, MetadataError> {
    // AniList answers a search with no hit with 404 and a "Not Found." error.
    if status == 404 {
        return Err(MetadataError::NoMatch);
    }
    if !(200..300).contains(&status) {
        return Err(MetadataError::Status(status));
    }

    let response: GraphQlResponse =
        serde_json::from_str(body).map_err(|e| MetadataError::Malformed(e.to_string()))?;

    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(MetadataError::GraphQl(messages.join("; ")));
    }

    response
        .data
        .and_then(|d| d.media)
        .map(map_media)
        .ok_or(MetadataError::NoMatch)
}

/// `AniList` GraphQL client.
#[derive(Clone)]
pub struct AnilistClient {
    client: Client,
    endpoint: String,
}

impl AnilistClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &MetadataConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    async fn query(&self, variables: MediaVariables<'_>) -> Result<MetadataRecord, MetadataError> {
        let request_body = GraphQlRequest {
            query: MEDIA_QUERY,
            variables,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_media_response(status, &body)
    }
}

#[async_trait]
impl MetadataLookup for AnilistClient {
    async fn fetch_by_title(&self, title: &str) -> Result<MetadataRecord, MetadataError> {
        self.query(MediaVariables {
            id: None,
            search: Some(title),
        })
        .await
    }

    async fn fetch_by_id(&self, id: i32) -> Result<MetadataRecord, MetadataError> {
        self.query(MediaVariables {
            id: Some(id),
            search: None,
        })
        .await
    }
}
