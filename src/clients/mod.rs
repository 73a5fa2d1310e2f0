pub mod anilist;
pub mod catalog;

pub use anilist::{AnilistClient, MetadataError, MetadataLookup};
pub use catalog::{CatalogClient, CatalogError, CatalogFetch, CatalogRequest};
