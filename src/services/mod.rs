pub mod catalog;
pub use catalog::{AnimeInfo, CatalogService, Discover};

pub mod enrichment;
pub use enrichment::EnrichmentService;

pub mod franchise;
pub use franchise::{MatchMode, group_franchise, group_franchise_with};
