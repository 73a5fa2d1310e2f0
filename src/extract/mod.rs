//! Markup extraction for catalog pages.
//!
//! Every [`DocumentShape`] owns ordered selector strategies. Container
//! strategies are tried in order and the first that matches at least one node
//! wins; each field inside a node has its own chain of [`FieldStrategy`]
//! functions. Nothing here fails: misses become `None`, items without their
//! required fields are skipped, and unparsable input yields an empty list.

mod detail;
mod episodes;
mod listing;

use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::debug;

use crate::models::{AnimeDetail, Episode, RawItem};

/// Home page sidebar blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SidebarList {
    TopAiring,
    MostPopular,
    MostFavorite,
}

impl SidebarList {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopAiring => "top-airing",
            Self::MostPopular => "most-popular",
            Self::MostFavorite => "most-favorite",
        }
    }

    /// Text the block heading is expected to contain, lowercased.
    #[must_use]
    pub fn heading(self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl fmt::Display for SidebarList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of catalog document being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentShape {
    ScheduleList,
    SearchGrid,
    EpisodeList,
    DetailPage,
    Trending,
    Sidebar(SidebarList),
}

/// One record produced by [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Item(RawItem),
    Episode(Episode),
    Detail(AnimeDetail),
}

/// Extracts every record of `shape` from `markup`.
///
/// `markup` may be a full page or a JSON envelope carrying an `html` string.
#[must_use]
pub fn extract(shape: DocumentShape, markup: &str) -> Vec<Extracted> {
    match shape {
        DocumentShape::EpisodeList => extract_episodes(markup)
            .into_iter()
            .map(Extracted::Episode)
            .collect(),
        DocumentShape::DetailPage => extract_detail(markup)
            .into_iter()
            .map(Extracted::Detail)
            .collect(),
        listing => extract_items(listing, markup)
            .into_iter()
            .map(Extracted::Item)
            .collect(),
    }
}

/// Listing shapes (schedule, search grid, trending, sidebars) as raw items.
#[must_use]
pub fn extract_items(shape: DocumentShape, markup: &str) -> Vec<RawItem> {
    let Some(document) = parse_markup(markup) else {
        return Vec::new();
    };
    let root = document.root_element();

    let items = match shape {
        DocumentShape::ScheduleList => listing::schedule(root),
        DocumentShape::SearchGrid => listing::search_grid(root),
        DocumentShape::Trending => listing::trending(root),
        DocumentShape::Sidebar(list) => listing::sidebar(root, list),
        DocumentShape::EpisodeList | DocumentShape::DetailPage => {
            debug!(?shape, "shape does not produce listing items");
            Vec::new()
        }
    };

    debug!(?shape, count = items.len(), "extracted listing items");
    items
}

/// Episode list, sorted ascending by number.
#[must_use]
pub fn extract_episodes(markup: &str) -> Vec<Episode> {
    parse_markup(markup).map_or_else(Vec::new, |document| {
        episodes::episode_list(document.root_element())
    })
}

#[must_use]
pub fn extract_detail(markup: &str) -> Option<AnimeDetail> {
    let document = parse_markup(markup)?;
    detail::detail_page(document.root_element())
}

/// Parses raw markup, unwrapping `{"html": "..."}` envelopes first.
fn parse_markup(markup: &str) -> Option<Html> {
    let trimmed = markup.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('{') {
        let envelope: serde_json::Value = match serde_json::from_str(trimmed) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "markup looked like JSON but did not parse");
                return None;
            }
        };

        let html = envelope.get("html").and_then(serde_json::Value::as_str)?;
        if html.trim().is_empty() {
            return None;
        }
        return Some(Html::parse_fragment(html));
    }

    Some(Html::parse_document(trimmed))
}

/// Pure, total field extractor applied to one matched node.
pub(crate) type FieldStrategy = fn(ElementRef<'_>) -> Option<String>;

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css)
        .map_err(|e| debug!(css, error = ?e, "invalid selector"))
        .ok()
}

/// Text content with whitespace collapsed.
pub(crate) fn text_of(node: ElementRef<'_>) -> String {
    node.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty text among descendants matching `css`.
pub(crate) fn text_at(node: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = selector(css)?;
    node.select(&selector)
        .map(text_of)
        .find(|text| !text.is_empty())
}

/// First non-empty `attr` among descendants matching `css`.
pub(crate) fn attr_at(node: ElementRef<'_>, css: &str, attr: &str) -> Option<String> {
    let selector = selector(css)?;
    node.select(&selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(String::from)
}

pub(crate) fn own_attr(node: ElementRef<'_>, attr: &str) -> Option<String> {
    node.value()
        .attr(attr)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// Runs a field chain, returning the first hit.
pub(crate) fn first_field(node: ElementRef<'_>, chain: &[FieldStrategy]) -> Option<String> {
    chain.iter().find_map(|strategy| strategy(node))
}

/// Selects descendants of `root` with the first strategy that matches.
pub(crate) fn select_with_fallback<'a>(
    root: ElementRef<'a>,
    strategies: &[&str],
) -> Vec<ElementRef<'a>> {
    for css in strategies {
        let Some(selector) = selector(css) else {
            continue;
        };

        let nodes: Vec<_> = root.select(&selector).collect();
        if !nodes.is_empty() {
            debug!(css, count = nodes.len(), "selector strategy matched");
            return nodes;
        }
    }

    debug!(?strategies, "no selector strategy matched");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_garbage_markup() {
        for shape in [
            DocumentShape::ScheduleList,
            DocumentShape::SearchGrid,
            DocumentShape::EpisodeList,
            DocumentShape::DetailPage,
            DocumentShape::Trending,
            DocumentShape::Sidebar(SidebarList::TopAiring),
        ] {
            assert!(extract(shape, "").is_empty());
            assert!(extract(shape, "   ").is_empty());
            assert!(extract(shape, "{not json").is_empty());
            assert!(extract(shape, r#"{"status":false}"#).is_empty());
            assert!(extract(shape, "<html><body><p>maintenance</p></body></html>").is_empty());
        }
    }

    #[test]
    fn test_json_envelope_is_unwrapped() {
        let markup = serde_json::json!({
            "status": true,
            "html": "<div class=\"flw-item\"><h3 class=\"film-name\"><a href=\"/naruto-677\">Naruto</a></h3></div>"
        })
        .to_string();

        let items = extract_items(DocumentShape::SearchGrid, &markup);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Naruto");
        assert_eq!(items[0].raw_link, "/naruto-677");
    }

    #[test]
    fn test_extract_dispatches_by_shape() {
        let markup = r#"<a class="ep-item" data-number="1" data-id="10" title="Pilot" href="/watch/x-1?ep=10"></a>"#;
        let records = extract(DocumentShape::EpisodeList, markup);
        assert!(matches!(records.as_slice(), [Extracted::Episode(ep)] if ep.id == "10"));

        assert!(extract_items(DocumentShape::EpisodeList, markup).is_empty());
    }

    #[test]
    fn test_sidebar_list_heading() {
        assert_eq!(SidebarList::TopAiring.heading(), "top airing");
        assert_eq!(SidebarList::MostFavorite.to_string(), "most-favorite");
    }

    #[test]
    fn test_text_of_collapses_whitespace() {
        let html = Html::parse_fragment("<div>  One \n  <b>Piece</b>  </div>");
        let root = html.root_element();
        assert_eq!(text_at(root, "div").as_deref(), Some("One Piece"));
    }
}
