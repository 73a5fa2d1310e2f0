pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod domain;
pub mod extract;
pub mod models;
pub mod parser;
pub mod services;

pub use cli::{Cli, Commands};
pub use config::Config;

use anyhow::Context;
use config::GeneralConfig;
use services::CatalogService;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr so stdout carries only
/// command output; `RUST_LOG` overrides the configured level.
pub fn init_tracing(general: &GeneralConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if general.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    use crate::cli::commands;

    init_tracing(&config.general);

    let service = || -> anyhow::Result<CatalogService> {
        config.validate().context("Invalid configuration")?;
        CatalogService::from_config(&config)
    };

    match cli.command {
        Commands::Init => commands::cmd_init(cli.config.as_deref()),
        Commands::Resolve { input } => commands::cmd_resolve(&input),
        Commands::Search { query, page } => {
            commands::cmd_search(&service()?, &query.join(" "), page).await
        }
        Commands::Schedule { date } => commands::cmd_schedule(&service()?, date).await,
        Commands::Discover => commands::cmd_discover(&service()?).await,
        Commands::Episodes { anime } => commands::cmd_episodes(&service()?, &anime).await,
        Commands::Info { anime } => commands::cmd_info(&service()?, &anime).await,
        Commands::Franchise { title, strict } => {
            commands::cmd_franchise(&service()?, &title.join(" "), strict).await
        }
        Commands::Metadata { query } => {
            commands::cmd_metadata(&service()?, &query.join(" ")).await
        }
    }
}
