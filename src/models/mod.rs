pub mod anime;
pub mod catalog;
pub mod episode;

pub use anime::MetadataRecord;
pub use catalog::{AnimeDetail, CatalogEntry, EnrichedItem, FranchiseEntry, InfoValue, RawItem};
pub use episode::Episode;
