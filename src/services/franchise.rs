//! Groups the seasons and parts of one franchise.

use std::future::Future;
use tracing::debug;

use crate::constants::limits::{FRANCHISE_SEARCH_LIMIT, MAX_FRANCHISE_ENTRIES};
use crate::models::{EnrichedItem, FranchiseEntry};
use crate::parser::{natural_cmp, normalize_for_matching, strip_season_qualifiers};

/// How candidate titles are matched against the base title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Either lowercased title contains the other.
    #[default]
    Containment,
    /// The candidate's normalized words start with the base title's words.
    Strict,
}

impl MatchMode {
    fn matches(self, base: &str, candidate: &str) -> bool {
        if candidate.trim().is_empty() {
            return false;
        }

        match self {
            Self::Containment => {
                let base = base.to_lowercase();
                let candidate = candidate.to_lowercase();
                candidate.contains(&base) || base.contains(&candidate)
            }
            Self::Strict => {
                let base = normalize_for_matching(base);
                let candidate = normalize_for_matching(candidate);
                !base.is_empty()
                    && (candidate == base || candidate.starts_with(&format!("{base} ")))
            }
        }
    }
}

/// [`group_franchise_with`] using [`MatchMode::Containment`].
pub async fn group_franchise<F, Fut>(title: &str, search: F) -> Vec<FranchiseEntry>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Vec<EnrichedItem>>,
{
    group_franchise_with(title, MatchMode::default(), search).await
}

/// Finds the related entries of `title`, sorted naturally, at most
/// [`MAX_FRANCHISE_ENTRIES`].
///
/// `search` receives the title with its season/part qualifiers removed and
/// returns enriched candidates; only the first [`FRANCHISE_SEARCH_LIMIT`]
/// are considered.
pub async fn group_franchise_with<F, Fut>(
    title: &str,
    mode: MatchMode,
    search: F,
) -> Vec<FranchiseEntry>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Vec<EnrichedItem>>,
{
    let base_title = strip_season_qualifiers(title);
    if base_title.is_empty() {
        debug!("empty franchise title");
        return Vec::new();
    }

    let candidates = search(base_title.clone()).await;
    let found = candidates.len();

    let mut related: Vec<EnrichedItem> = candidates
        .into_iter()
        .take(FRANCHISE_SEARCH_LIMIT)
        .filter(|candidate| mode.matches(&base_title, &candidate.title))
        .collect();

    related.sort_by(|a, b| natural_cmp(&a.title, &b.title));
    related.truncate(MAX_FRANCHISE_ENTRIES);

    debug!(
        base_title = %base_title,
        ?mode,
        found,
        kept = related.len(),
        "grouped franchise"
    );

    related.into_iter().map(FranchiseEntry::from).collect()
}
