use crate::services::{CatalogService, MatchMode};

use super::print_json;

pub async fn cmd_franchise(
    service: &CatalogService,
    title: &str,
    strict: bool,
) -> anyhow::Result<()> {
    let mode = if strict {
        MatchMode::Strict
    } else {
        MatchMode::Containment
    };

    let entries = service.franchise(title, mode).await;
    print_json(&entries)
}
