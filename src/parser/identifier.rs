//! Canonical ID resolution for catalog links.
//!
//! The catalog encodes entry IDs as the trailing digits of a hyphenated slug
//! (`/demon-slayer-47`), sometimes behind a `watch` segment and with the
//! episode in the query string (`/watch/demon-slayer-47?ep=2000`). Listing
//! endpoints also hand out bare numeric IDs. Everything here is pure and total.

use regex::Regex;
use std::sync::OnceLock;

use crate::constants::sentinel::UNKNOWN_ID;
use crate::domain::{CanonicalId, EpisodeRef};

fn trailing_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+$").expect("Invalid regex pattern defined in code"))
}

fn is_bare_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Drops fragment, query string and `scheme://host` from a link.
fn path_of(input: &str) -> &str {
    let without_fragment = input.split('#').next().unwrap_or_default();
    let path = without_fragment.split('?').next().unwrap_or_default();

    match path.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |idx| &rest[idx..]),
        None => path,
    }
}

fn query_of(input: &str) -> Option<&str> {
    let without_fragment = input.split('#').next()?;
    without_fragment.split_once('?').map(|(_, query)| query)
}

/// Resolves a URL, slug or bare ID into a [`CanonicalId`].
///
/// Segments are scanned from the end; the first one holding both a hyphen
/// and a digit supplies the trailing digit run. Inputs with no such segment
/// resolve to the `"unknown"` sentinel.
///
/// # Examples
///
/// ```
/// use anidex::parser::identifier::resolve;
///
/// assert_eq!(resolve("/watch/demon-slayer-47?ep=2000").numeric_id, "47");
/// assert_eq!(resolve("18079").numeric_id, "18079");
/// assert_eq!(resolve("/home").numeric_id, "unknown");
/// ```
#[must_use]
pub fn resolve(input: &str) -> CanonicalId {
    let input = input.trim();

    if is_bare_digits(input) {
        return CanonicalId::new(input, input);
    }

    let segments: Vec<&str> = path_of(input)
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "watch")
        .collect();

    for segment in segments.iter().rev() {
        if !segment.contains('-') || !segment.bytes().any(|b| b.is_ascii_digit()) {
            continue;
        }

        if let Some(m) = trailing_digits().find(segment) {
            return CanonicalId::new(m.as_str(), *segment);
        }
    }

    CanonicalId::unresolved(segments.last().copied().unwrap_or_default())
}

/// Reads the numeric `ep` query parameter from a link, if present.
#[must_use]
pub fn episode_param(input: &str) -> Option<String> {
    let query = query_of(input.trim())?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "ep")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| is_bare_digits(value))
}

/// Resolves a full watch URL into anime and episode IDs.
///
/// A missing or non-numeric `ep` parameter yields the `"unknown"` sentinel
/// for the episode half.
#[must_use]
pub fn resolve_episode_ref(input: &str) -> EpisodeRef {
    EpisodeRef {
        anime_id: resolve(input).numeric_id,
        episode_id: episode_param(input).unwrap_or_else(|| UNKNOWN_ID.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_digits_are_canonical() {
        let id = resolve("18079");
        assert_eq!(id.numeric_id, "18079");
        assert_eq!(id.slug, "18079");
    }

    #[test]
    fn test_slug_trailing_digits() {
        let id = resolve("one-piece-100");
        assert_eq!(id.numeric_id, "100");
        assert_eq!(id.slug, "one-piece-100");

        assert_eq!(resolve("/jujutsu-kaisen-2nd-season-18413").numeric_id, "18413");
        assert_eq!(resolve("mob-psycho-100-iii-18015").numeric_id, "18015");
    }

    #[test]
    fn test_full_urls() {
        let id = resolve("https://hianime.to/watch/frieren-beyond-journeys-end-18542?ep=107257");
        assert_eq!(id.numeric_id, "18542");
        assert_eq!(id.slug, "frieren-beyond-journeys-end-18542");

        assert_eq!(resolve("https://hianime.to/solo-leveling-18718#top").numeric_id, "18718");
    }

    #[test]
    fn test_watch_segment_is_discarded() {
        let id = resolve("/watch/demon-slayer-47");
        assert_eq!(id.slug, "demon-slayer-47");
        assert_eq!(id.numeric_id, "47");
    }

    #[test]
    fn test_no_digits_is_unknown() {
        for input in ["", "/home", "naruto", "attack-on-titan", "/watch/", "https://hianime.to/"] {
            assert_eq!(resolve(input).numeric_id, "unknown", "input: {input:?}");
        }
    }

    #[test]
    fn test_digits_without_trailing_run_are_unknown() {
        assert_eq!(resolve("/demon-slayer-47-dub").numeric_id, "unknown");
    }

    #[test]
    fn test_hyphenless_segment_with_digits_is_skipped() {
        assert_eq!(resolve("/anime/47").numeric_id, "unknown");
        assert_eq!(resolve("/one-piece-100/ep2").numeric_id, "100");
    }

    #[test]
    fn test_resolve_episode_ref() {
        let r = resolve_episode_ref("/watch/demon-slayer-47?ep=2000");
        assert_eq!(r.anime_id, "47");
        assert_eq!(r.episode_id, "2000");
        assert!(r.has_episode());
    }

    #[test]
    fn test_resolve_episode_ref_without_episode() {
        let r = resolve_episode_ref("/watch/demon-slayer-47");
        assert_eq!(r.anime_id, "47");
        assert_eq!(r.episode_id, "unknown");

        let r = resolve_episode_ref("/watch/demon-slayer-47?ep=abc");
        assert_eq!(r.episode_id, "unknown");
    }

    #[test]
    fn test_episode_param_among_other_params() {
        assert_eq!(
            episode_param("/watch/x-1?lang=en&ep=94736&t=3").as_deref(),
            Some("94736")
        );
        assert_eq!(episode_param("/watch/x-1"), None);
    }
}
