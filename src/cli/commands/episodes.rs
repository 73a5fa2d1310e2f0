use tracing::warn;

use crate::services::CatalogService;

use super::print_json;

pub async fn cmd_episodes(service: &CatalogService, anime: &str) -> anyhow::Result<()> {
    let episodes = service.episodes(anime).await;
    if episodes.is_empty() {
        warn!(anime, "no episodes found");
    }
    print_json(&episodes)
}
