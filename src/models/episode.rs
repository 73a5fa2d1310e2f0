use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// 1-based episode number.
    pub number: u32,
    pub id: String,
    pub title: String,
}

/// Stable ascending sort by episode number.
pub fn sort_episodes(episodes: &mut [Episode]) {
    episodes.sort_by_key(|episode| episode.number);
}
