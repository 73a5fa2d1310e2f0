use crate::services::CatalogService;

use super::print_json;

pub async fn cmd_search(service: &CatalogService, query: &str, page: u32) -> anyhow::Result<()> {
    let results = service.search(query, page).await;
    print_json(&results)
}
