mod discover;
mod episodes;
mod franchise;
mod info;
mod init;
mod metadata;
mod resolve;
mod schedule;
mod search;

pub use discover::cmd_discover;
pub use episodes::cmd_episodes;
pub use franchise::cmd_franchise;
pub use info::cmd_info;
pub use init::cmd_init;
pub use metadata::cmd_metadata;
pub use resolve::cmd_resolve;
pub use schedule::cmd_schedule;
pub use search::cmd_search;

use serde::Serialize;

/// Pretty-prints `value` as JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
