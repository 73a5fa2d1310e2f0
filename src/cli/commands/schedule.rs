use chrono::{Local, NaiveDate};
use tracing::info;

use crate::services::CatalogService;

use super::print_json;

pub async fn cmd_schedule(
    service: &CatalogService,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    info!(%date, "fetching schedule");

    let entries = service.schedule(date).await;
    print_json(&entries)
}
