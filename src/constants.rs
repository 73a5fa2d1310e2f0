pub mod limits {

    /// Maximum number of metadata lookups in flight during one enrichment batch.
    pub const ENRICH_CONCURRENCY: usize = 5;

    pub const FRANCHISE_SEARCH_LIMIT: usize = 20;

    pub const MAX_FRANCHISE_ENTRIES: usize = 10;

    pub const MAX_GENRES: usize = 3;
}

pub mod sentinel {

    pub const UNKNOWN_ID: &str = "unknown";

    pub const NO_POSTER: &str = "N/A";

    pub const NO_RANK: &str = "N/A";
}

pub mod defaults {

    pub const CATALOG_BASE_URL: &str = "https://hianime.to";

    pub const METADATA_ENDPOINT: &str = "https://graphql.anilist.co";

    pub const USER_AGENTS: &[&str] = &[
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/119.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) Chrome/118.0.0.0 Safari/537.36",
        "Mozilla/5.0 (X11; Linux x86_64) Chrome/119.0.0.0 Safari/537.36",
    ];
}
