use async_trait::async_trait;
use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::CatalogConfig;
use crate::constants::defaults::USER_AGENTS;
use crate::extract::DocumentShape;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Transport(String),

    #[error("Catalog request timed out")]
    Timeout,

    #[error("Catalog returned HTTP {0}")]
    Status(u16),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// A catalog page to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    /// Home page; carries the trending list and the sidebar blocks.
    Home,
    Search { keyword: String, page: u32 },
    Schedule { date: NaiveDate, tz_offset: i32 },
    Episodes { anime_id: String },
    Detail { slug: String },
}

impl CatalogRequest {
    /// Absolute URL of this page under `base`.
    pub fn url(&self, base: &Url) -> Result<Url, CatalogError> {
        let url = match self {
            Self::Home => under(base, ["home"])?,
            Self::Search { keyword, page } => {
                let mut url = under(base, ["search"])?;
                url.query_pairs_mut()
                    .append_pair("keyword", keyword)
                    .append_pair("page", &page.to_string());
                url
            }
            Self::Schedule { date, tz_offset } => {
                let mut url = under(base, ["ajax", "schedule", "list"])?;
                url.query_pairs_mut()
                    .append_pair("tzOffset", &tz_offset.to_string())
                    .append_pair("date", &date.format("%Y-%m-%d").to_string());
                url
            }
            Self::Episodes { anime_id } => {
                under(base, ["ajax", "v2", "episode", "list", anime_id.as_str()])?
            }
            Self::Detail { slug } => {
                under(base, slug.split('/').filter(|segment| !segment.is_empty()))?
            }
        };
        Ok(url)
    }

    /// Shape the fetched markup is parsed as.
    #[must_use]
    pub const fn shape(&self) -> DocumentShape {
        match self {
            Self::Home => DocumentShape::Trending,
            Self::Search { .. } => DocumentShape::SearchGrid,
            Self::Schedule { .. } => DocumentShape::ScheduleList,
            Self::Episodes { .. } => DocumentShape::EpisodeList,
            Self::Detail { .. } => DocumentShape::DetailPage,
        }
    }

    /// Whether the endpoint answers with a JSON envelope.
    #[must_use]
    pub const fn is_ajax(&self) -> bool {
        matches!(self, Self::Schedule { .. } | Self::Episodes { .. })
    }
}

/// Fetches raw catalog markup.
#[async_trait]
pub trait CatalogFetch: Send + Sync {
    async fn fetch(&self, request: &CatalogRequest) -> Result<String, CatalogError>;
}

/// HTTP client for the catalog site.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    user_agents: Vec<String>,
}

/// Parses `raw`, normalizing its path to end in a slash.
fn base_url(raw: &str) -> Result<Url, CatalogError> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Appends `segments` to the path of `base`, escaping each one.
fn under<'a>(
    base: &Url,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, CatalogError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

impl CatalogClient {
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> anyhow::Result<Self> {
        let base_url = base_url(&config.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid catalog base URL {}: {e}", config.base_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url,
            user_agents: config.user_agents.clone(),
        })
    }

    fn pick_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::rng())
            .map_or(USER_AGENTS[0], String::as_str)
    }
}

#[async_trait]
impl CatalogFetch for CatalogClient {
    async fn fetch(&self, request: &CatalogRequest) -> Result<String, CatalogError> {
        let url = request.url(&self.base_url)?;
        debug!(url = %url, "fetching catalog page");

        let mut builder = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.pick_user_agent());
        if request.is_ajax() {
            builder = builder.header("X-Requested-With", "XMLHttpRequest");
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
