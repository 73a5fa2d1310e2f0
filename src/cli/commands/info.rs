use tracing::warn;

use crate::services::CatalogService;

use super::print_json;

pub async fn cmd_info(service: &CatalogService, anime: &str) -> anyhow::Result<()> {
    let info = service.info(anime).await;
    if info.is_none() {
        warn!(anime, "detail page not found");
    }
    print_json(&info)
}
