use serde::Serialize;

use crate::parser::identifier::{resolve, resolve_episode_ref};

use super::print_json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Resolved {
    numeric_id: String,
    slug: String,
    episode_id: String,
}

fn resolved(input: &str) -> Resolved {
    let canonical = resolve(input);
    let episode = resolve_episode_ref(input);

    Resolved {
        numeric_id: canonical.numeric_id,
        slug: canonical.slug,
        episode_id: episode.episode_id,
    }
}

pub fn cmd_resolve(input: &str) -> anyhow::Result<()> {
    print_json(&resolved(input))
}
