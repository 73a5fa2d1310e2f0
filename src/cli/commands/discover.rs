use crate::services::CatalogService;

use super::print_json;

pub async fn cmd_discover(service: &CatalogService) -> anyhow::Result<()> {
    print_json(&service.discover().await)
}
