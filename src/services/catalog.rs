//! Catalog pipeline: fetch, extract, enrich.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::{
    AnilistClient, CatalogClient, CatalogFetch, CatalogRequest, MetadataLookup,
};
use crate::config::Config;
use crate::constants::limits::FRANCHISE_SEARCH_LIMIT;
use crate::extract::{self, DocumentShape, SidebarList};
use crate::models::{
    AnimeDetail, CatalogEntry, EnrichedItem, Episode, FranchiseEntry, MetadataRecord, RawItem,
};
use crate::parser::identifier;
use crate::services::enrichment::EnrichmentService;
use crate::services::franchise::{MatchMode, group_franchise_with};

/// Home page lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discover {
    pub trending: Vec<CatalogEntry>,
    pub top_airing: Vec<CatalogEntry>,
    pub most_popular: Vec<CatalogEntry>,
    pub most_favorite: Vec<CatalogEntry>,
}

/// Detail page of one anime plus its metadata record, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeInfo {
    pub id: String,
    pub slug: String,
    pub detail: AnimeDetail,
    pub metadata: Option<MetadataRecord>,
}

pub struct CatalogService {
    catalog: Arc<dyn CatalogFetch>,
    metadata: Arc<dyn MetadataLookup>,
    enrichment: EnrichmentService,
    schedule_tz_offset: i32,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogFetch>,
        metadata: Arc<dyn MetadataLookup>,
        schedule_tz_offset: i32,
    ) -> Self {
        let enrichment = EnrichmentService::new(Arc::clone(&metadata));
        Self {
            catalog,
            metadata,
            enrichment,
            schedule_tz_offset,
        }
    }

    /// Wires the HTTP clients described by `config`.
    ///
    /// # Errors
    /// Returns an error if either HTTP client cannot be built.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let metadata = AnilistClient::new(&config.metadata)?;
        info!(
            base_url = %config.catalog.base_url,
            endpoint = %config.metadata.endpoint,
            "catalog service ready"
        );

        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(metadata),
            config.catalog.schedule_tz_offset,
        ))
    }

    /// Raw markup, or `None` after logging why the fetch failed.
    async fn fetch_markup(&self, request: &CatalogRequest) -> Option<String> {
        match self.catalog.fetch(request).await {
            Ok(markup) => Some(markup),
            Err(e) => {
                warn!(?request, error = %e, "catalog fetch failed");
                None
            }
        }
    }

    async fn fetch_items(&self, request: &CatalogRequest) -> Vec<RawItem> {
        self.fetch_markup(request)
            .await
            .map(|markup| extract::extract_items(request.shape(), &markup))
            .unwrap_or_default()
    }

    async fn search_items(&self, keyword: &str, page: u32) -> Vec<RawItem> {
        let request = CatalogRequest::Search {
            keyword: keyword.trim().to_string(),
            page: page.max(1),
        };
        self.fetch_items(&request).await
    }

    /// Search results for `keyword`, enriched.
    pub async fn search(&self, keyword: &str, page: u32) -> Vec<EnrichedItem> {
        if keyword.trim().is_empty() {
            return Vec::new();
        }
        let items = self.search_items(keyword, page).await;
        self.enrichment.enrich(items).await
    }

    /// Airing schedule for `date`, enriched.
    pub async fn schedule(&self, date: NaiveDate) -> Vec<EnrichedItem> {
        let request = CatalogRequest::Schedule {
            date,
            tz_offset: self.schedule_tz_offset,
        };
        let items = self.fetch_items(&request).await;
        self.enrichment.enrich(items).await
    }

    /// Trending and sidebar lists from a single home page fetch.
    pub async fn discover(&self) -> Discover {
        let Some(markup) = self.fetch_markup(&CatalogRequest::Home).await else {
            return Discover::default();
        };

        let entries = |shape| -> Vec<CatalogEntry> {
            extract::extract_items(shape, &markup)
                .into_iter()
                .map(CatalogEntry::from)
                .collect()
        };

        Discover {
            trending: entries(DocumentShape::Trending),
            top_airing: entries(DocumentShape::Sidebar(SidebarList::TopAiring)),
            most_popular: entries(DocumentShape::Sidebar(SidebarList::MostPopular)),
            most_favorite: entries(DocumentShape::Sidebar(SidebarList::MostFavorite)),
        }
    }

    /// Episode list for an anime given as URL, slug or numeric id.
    pub async fn episodes(&self, anime: &str) -> Vec<Episode> {
        let canonical = identifier::resolve(anime);
        if !canonical.is_resolved() {
            debug!(anime, "no numeric id; skipping episode fetch");
            return Vec::new();
        }

        let request = CatalogRequest::Episodes {
            anime_id: canonical.numeric_id,
        };
        self.fetch_markup(&request)
            .await
            .map(|markup| extract::extract_episodes(&markup))
            .unwrap_or_default()
    }

    /// Detail page for an anime given as URL or slug, with its metadata.
    pub async fn info(&self, anime: &str) -> Option<AnimeInfo> {
        let canonical = identifier::resolve(anime);
        if canonical.slug.is_empty() {
            return None;
        }

        let request = CatalogRequest::Detail {
            slug: canonical.slug.clone(),
        };
        let markup = self.fetch_markup(&request).await?;
        let Some(detail) = extract::extract_detail(&markup) else {
            debug!(slug = %canonical.slug, "detail page had no title");
            return None;
        };

        let metadata = self.metadata.lookup_by_title(&detail.title).await;

        Some(AnimeInfo {
            id: canonical.numeric_id,
            slug: canonical.slug,
            detail,
            metadata,
        })
    }

    /// Seasons and parts related to `title`.
    pub async fn franchise(&self, title: &str, mode: MatchMode) -> Vec<FranchiseEntry> {
        group_franchise_with(title, mode, |base_title| async move {
            let mut items = self.search_items(&base_title, 1).await;
            items.truncate(FRANCHISE_SEARCH_LIMIT);
            self.enrichment.enrich(items).await
        })
        .await
    }

    /// Metadata by external id when `query` is all digits, else by title.
    pub async fn metadata(&self, query: &str) -> Option<MetadataRecord> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        match query.parse::<i32>() {
            Ok(id) if query.bytes().all(|b| b.is_ascii_digit()) => {
                self.metadata.lookup_by_id(id).await
            }
            _ => self.metadata.lookup_by_title(query).await,
        }
    }
}
