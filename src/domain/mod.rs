//! Domain identifiers shared by the catalog pipeline.
//!
//! Catalog pages reference the same entry through URLs, slugs and bare numeric
//! IDs. These types carry the canonical form produced by
//! [`crate::parser::identifier`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::sentinel::UNKNOWN_ID;

/// Canonical reference to a catalog entry.
///
/// `numeric_id` is either a run of ASCII digits or the `"unknown"` sentinel.
/// The sentinel is kept visible so callers can decide whether to reject it.
///
/// # Examples
///
/// ```rust
/// use anidex::domain::CanonicalId;
///
/// let id = CanonicalId::new("47", "demon-slayer-47");
/// assert!(id.is_resolved());
/// assert_eq!(id.to_string(), "47");
///
/// let missing = CanonicalId::unresolved("home");
/// assert!(!missing.is_resolved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalId {
    pub numeric_id: String,
    pub slug: String,
}

impl CanonicalId {
    #[must_use]
    pub fn new(numeric_id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            numeric_id: numeric_id.into(),
            slug: slug.into(),
        }
    }

    /// Builds an ID carrying the `"unknown"` sentinel.
    #[must_use]
    pub fn unresolved(slug: impl Into<String>) -> Self {
        Self::new(UNKNOWN_ID, slug)
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.numeric_id != UNKNOWN_ID
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.numeric_id)
    }
}

/// Anime and episode IDs pulled from a watch URL such as
/// `/watch/demon-slayer-47?ep=2000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRef {
    pub anime_id: String,
    pub episode_id: String,
}

impl EpisodeRef {
    #[must_use]
    pub fn has_episode(&self) -> bool {
        self.episode_id != UNKNOWN_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_id_sentinel() {
        let id = CanonicalId::unresolved("");
        assert_eq!(id.numeric_id, "unknown");
        assert!(!id.is_resolved());
    }

    #[test]
    fn canonical_id_serialization() {
        let id = CanonicalId::new("47", "demon-slayer-47");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#"{"numericId":"47","slug":"demon-slayer-47"}"#);
    }

    #[test]
    fn episode_ref_without_episode() {
        let r = EpisodeRef {
            anime_id: "47".to_string(),
            episode_id: "unknown".to_string(),
        };
        assert!(!r.has_episode());
    }
}
