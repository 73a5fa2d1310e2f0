use scraper::ElementRef;
use std::collections::BTreeMap;
use tracing::debug;

use super::{
    FieldStrategy, attr_at, first_field, select_with_fallback, selector, text_at, text_of,
};
use crate::models::{AnimeDetail, InfoValue};

const TITLE: &[FieldStrategy] = &[
    |n| text_at(n, ".anisc-detail .film-name"),
    |n| text_at(n, "h2.film-name"),
    |n| text_at(n, ".film-name"),
    |n| attr_at(n, r#"meta[property="og:title"]"#, "content"),
    |n| text_at(n, "title"),
];

const RAW_LINK: &[FieldStrategy] = &[
    |n| attr_at(n, r#"link[rel="canonical"]"#, "href"),
    |n| attr_at(n, r#"meta[property="og:url"]"#, "content"),
    |n| attr_at(n, ".film-buttons a.btn-play", "href"),
    |n| attr_at(n, "a.btn-play", "href"),
];

const POSTER: &[FieldStrategy] = &[
    |n| attr_at(n, ".anisc-poster .film-poster img", "src"),
    |n| attr_at(n, ".film-poster img", "src"),
    |n| attr_at(n, ".film-poster img", "data-src"),
    |n| attr_at(n, r#"meta[property="og:image"]"#, "content"),
];

const DESCRIPTION: &[FieldStrategy] = &[
    |n| text_at(n, ".film-description .text"),
    |n| text_at(n, ".film-description"),
    |n| attr_at(n, r#"meta[name="description"]"#, "content"),
];

const INFO_ROWS: &[&str] = &[".anisc-info .item", ".anime-info .item", ".spe span"];

const INFO_LABEL: &[FieldStrategy] = &[
    |n| text_at(n, ".item-head"),
    |n| text_at(n, "b"),
    |n| text_at(n, "strong"),
];

const INFO_VALUE_SELECTORS: &[&str] = &[".name", "a", ".text"];

/// `"Premiered:"` becomes `"premiered"`, `"Date aired"` becomes `"date_aired"`.
fn info_key(label: &str) -> String {
    label
        .replace(':', "")
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn texts_at(node: ElementRef<'_>, css: &str) -> Vec<String> {
    selector(css).map_or_else(Vec::new, |selector| {
        node.select(&selector)
            .map(text_of)
            .filter(|text| !text.is_empty())
            .collect()
    })
}

fn row_values(node: ElementRef<'_>, label: &str) -> Vec<String> {
    if let Some(values) = INFO_VALUE_SELECTORS
        .iter()
        .map(|css| texts_at(node, css))
        .find(|values| !values.is_empty())
    {
        return values;
    }

    let text = text_of(node);
    let rest = text.strip_prefix(label).unwrap_or(&text).trim();
    if rest.is_empty() {
        Vec::new()
    } else {
        vec![rest.to_string()]
    }
}

fn info_table(root: ElementRef<'_>) -> BTreeMap<String, InfoValue> {
    let mut rows: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for node in select_with_fallback(root, INFO_ROWS) {
        let Some(label) = first_field(node, INFO_LABEL) else {
            continue;
        };
        let key = info_key(&label);
        if key.is_empty() {
            continue;
        }

        let values = row_values(node, &label);
        rows.entry(key).or_default().extend(values);
    }

    rows.into_iter()
        .filter_map(|(key, values)| InfoValue::from_values(values).map(|value| (key, value)))
        .collect()
}

pub(super) fn detail_page(root: ElementRef<'_>) -> Option<AnimeDetail> {
    let Some(title) = first_field(root, TITLE) else {
        debug!("detail page has no title");
        return None;
    };

    Some(AnimeDetail {
        title,
        raw_link: first_field(root, RAW_LINK).unwrap_or_default(),
        poster: first_field(root, POSTER),
        description: first_field(root, DESCRIPTION),
        info: info_table(root),
    })
}

#[cfg(test)]
mod tests {
    use super::info_key;
    use crate::extract::extract_detail;
    use crate::models::InfoValue;

    const DETAIL_HTML: &str = r#"
        <html><head>
            <title>Watch Attack on Titan English Sub/Dub online Free</title>
            <link rel="canonical" href="https://hianime.to/attack-on-titan-112">
        </head><body>
        <div class="anis-content">
            <div class="anisc-poster"><div class="film-poster"><img src="https://img.example/aot.jpg" class="film-poster-img"></div></div>
            <div class="anisc-detail">
                <h2 class="film-name dynamic-name">Attack on Titan</h2>
                <div class="film-buttons"><a href="/watch/attack-on-titan-112" class="btn btn-play">Watch now</a></div>
                <div class="film-description m-hide"><div class="text">Humanity lives inside walls.</div></div>
            </div>
            <div class="anisc-info">
                <div class="item item-title"><span class="item-head">Japanese:</span> <span class="name">進撃の巨人</span></div>
                <div class="item item-title"><span class="item-head">Aired:</span> <span class="name">Apr 7, 2013 to Sep 29, 2013</span></div>
                <div class="item item-title"><span class="item-head">Premiered:</span> <span class="name">Spring 2013</span></div>
                <div class="item item-list"><span class="item-head">Genres:</span>
                    <a href="/genre/action">Action</a><a href="/genre/drama">Drama</a>
                </div>
                <div class="item item-title"><span class="item-head">Studios:</span> <a class="name" href="/producer/wit-studio">Wit Studio</a></div>
                <div class="item"><span class="item-head">MAL Score:</span> 8.54</div>
            </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_primary_detail_layout() {
        let detail = extract_detail(DETAIL_HTML).unwrap();
        assert_eq!(detail.title, "Attack on Titan");
        assert_eq!(detail.raw_link, "https://hianime.to/attack-on-titan-112");
        assert_eq!(detail.poster.as_deref(), Some("https://img.example/aot.jpg"));
        assert_eq!(detail.description.as_deref(), Some("Humanity lives inside walls."));

        assert_eq!(
            detail.info.get("premiered"),
            Some(&InfoValue::Single("Spring 2013".to_string()))
        );
        assert_eq!(
            detail.info.get("genres"),
            Some(&InfoValue::List(vec!["Action".to_string(), "Drama".to_string()]))
        );
        assert_eq!(
            detail.info.get("studios"),
            Some(&InfoValue::Single("Wit Studio".to_string()))
        );
        assert_eq!(
            detail.info.get("mal_score"),
            Some(&InfoValue::Single("8.54".to_string()))
        );
    }

    #[test]
    fn test_fallback_detail_layout() {
        let html = r#"
            <html><head>
                <meta property="og:title" content="Naruto">
                <meta property="og:url" content="https://hianime.to/naruto-677">
                <meta property="og:image" content="https://img.example/naruto.jpg">
                <meta name="description" content="A ninja story.">
            </head><body>
                <div class="spe">
                    <span><b>Status:</b> Finished Airing</span>
                    <span><b>Genre:</b> <a>Action</a></span>
                    <span><b>Genre:</b> <a>Comedy</a></span>
                </div>
            </body></html>
        "#;
        let detail = extract_detail(html).unwrap();
        assert_eq!(detail.title, "Naruto");
        assert_eq!(detail.raw_link, "https://hianime.to/naruto-677");
        assert_eq!(detail.poster.as_deref(), Some("https://img.example/naruto.jpg"));
        assert_eq!(detail.description.as_deref(), Some("A ninja story."));
        assert_eq!(
            detail.info.get("status"),
            Some(&InfoValue::Single("Finished Airing".to_string()))
        );
        assert_eq!(
            detail.info.get("genre"),
            Some(&InfoValue::List(vec!["Action".to_string(), "Comedy".to_string()]))
        );
    }

    #[test]
    fn test_detail_requires_title() {
        let html = r#"<div class="anisc-info"><div class="item"><span class="item-head">Status:</span> Airing</div></div>"#;
        assert!(extract_detail(html).is_none());
    }

    #[test]
    fn test_missing_optional_fields() {
        let detail = extract_detail(r#"<h2 class="film-name">Dandadan</h2>"#).unwrap();
        assert_eq!(detail.title, "Dandadan");
        assert_eq!(detail.raw_link, "");
        assert!(detail.poster.is_none());
        assert!(detail.description.is_none());
        assert!(detail.info.is_empty());
    }

    #[test]
    fn test_info_key() {
        assert_eq!(info_key("Premiered:"), "premiered");
        assert_eq!(info_key("  Date aired : "), "date_aired");
        assert_eq!(info_key("MAL Score:"), "mal_score");
    }
}
