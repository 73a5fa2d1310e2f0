use crate::services::CatalogService;

use super::print_json;

pub async fn cmd_metadata(service: &CatalogService, query: &str) -> anyhow::Result<()> {
    print_json(&service.metadata(query).await)
}
