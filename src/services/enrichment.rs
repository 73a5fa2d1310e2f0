//! Bounded concurrent metadata enrichment.

use futures::stream::{self, StreamExt};
use metrics::counter;
use std::sync::Arc;
use tracing::debug;

use crate::clients::MetadataLookup;
use crate::constants::limits::ENRICH_CONCURRENCY;
use crate::models::{EnrichedItem, RawItem};

/// Cross-references scraped items against the metadata source.
#[derive(Clone)]
pub struct EnrichmentService {
    metadata: Arc<dyn MetadataLookup>,
}

impl EnrichmentService {
    #[must_use]
    pub fn new(metadata: Arc<dyn MetadataLookup>) -> Self {
        Self { metadata }
    }

    /// Looks up every item by title, at most [`ENRICH_CONCURRENCY`] at a time.
    ///
    /// The result has the same length and order as `items`. An item whose
    /// lookup fails carries sentinel metadata instead.
    pub async fn enrich(&self, items: Vec<RawItem>) -> Vec<EnrichedItem> {
        let total = items.len();

        let enriched: Vec<EnrichedItem> = stream::iter(items)
            .map(|item| {
                let metadata = Arc::clone(&self.metadata);
                async move {
                    let record = metadata.lookup_by_title(&item.title).await;
                    EnrichedItem::from_lookup(item, record)
                }
            })
            .buffered(ENRICH_CONCURRENCY)
            .collect()
            .await;

        let hits = enriched.iter().filter(|item| item.is_enriched()).count();
        counter!("anidex_enrichment_items_total", "outcome" => "enriched").increment(hits as u64);
        counter!("anidex_enrichment_items_total", "outcome" => "fallback")
            .increment((total - hits) as u64);
        debug!(total, hits, "enrichment batch complete");

        enriched
    }
}
