use std::path::Path;

use crate::config::Config;

pub fn cmd_init(path: Option<&Path>) -> anyhow::Result<()> {
    let target = path.unwrap_or_else(|| Path::new("config.toml"));

    if Config::create_default_if_missing(path)? {
        eprintln!("Created {}", target.display());
    } else {
        eprintln!("{} already exists, leaving it untouched", target.display());
    }

    Ok(())
}
