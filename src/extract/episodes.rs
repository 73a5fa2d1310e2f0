use regex::Regex;
use scraper::ElementRef;
use std::sync::OnceLock;

use super::{FieldStrategy, attr_at, first_field, own_attr, select_with_fallback, text_at, text_of};
use crate::models::Episode;
use crate::models::episode::sort_episodes;
use crate::parser::identifier::episode_param;

const CONTAINERS: &[&str] = &[
    ".ss-list a.ep-item",
    "a.ep-item",
    ".ss-list a",
    ".episodes-ul li",
    ".episode-list li",
    ".eplister li",
];

const ID: &[FieldStrategy] = &[
    |n| own_attr(n, "data-id"),
    |n| attr_at(n, "[data-id]", "data-id"),
    |n| own_attr(n, "href").and_then(|href| episode_param(&href)),
    |n| attr_at(n, "a", "href").and_then(|href| episode_param(&href)),
];

const NUMBER_ATTR: &[FieldStrategy] = &[
    |n| own_attr(n, "data-number").filter(|v| v.parse::<u32>().is_ok()),
    |n| attr_at(n, "[data-number]", "data-number").filter(|v| v.parse::<u32>().is_ok()),
];

const TITLE: &[FieldStrategy] = &[
    |n| own_attr(n, "title"),
    |n| text_at(n, ".ep-name"),
    |n| attr_at(n, ".ep-name", "title"),
    |n| text_at(n, ".epl-title"),
    |n| attr_at(n, "a", "title"),
    |n| Some(text_of(n)).filter(|text| !text.is_empty()),
];

fn first_digit_run(text: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\d+").expect("Invalid regex pattern defined in code"));
    re.find(text).and_then(|m| m.as_str().parse().ok())
}

fn episode_number(node: ElementRef<'_>) -> u32 {
    first_field(node, NUMBER_ATTR)
        .and_then(|value| value.parse().ok())
        .or_else(|| first_digit_run(&text_of(node)))
        .unwrap_or(1)
        .max(1)
}

/// Builds one episode; `position` is the 1-based DOM position.
fn normalize(node: ElementRef<'_>, position: usize) -> Episode {
    let number = episode_number(node);
    let id = first_field(node, ID).unwrap_or_else(|| format!("ep_{position}"));
    let title = first_field(node, TITLE).unwrap_or_else(|| format!("Episode {number}"));

    Episode { number, id, title }
}

pub(super) fn episode_list(root: ElementRef<'_>) -> Vec<Episode> {
    let mut episodes: Vec<Episode> = select_with_fallback(root, CONTAINERS)
        .into_iter()
        .enumerate()
        .map(|(idx, node)| normalize(node, idx + 1))
        .collect();

    sort_episodes(&mut episodes);
    episodes
}

#[cfg(test)]
mod tests {
    use crate::extract::extract_episodes;

    #[test]
    fn test_primary_layout_from_json_envelope() {
        let html = r#"
            <div class="ss-list">
                <a title="Second" class="ssl-item ep-item" data-number="2" data-id="2143" href="/watch/attack-on-titan-112?ep=2143">
                    <div class="ssli-order">2</div>
                    <div class="ssli-detail"><div class="ep-name e-dynamic-name">Second</div></div>
                </a>
                <a title="To You, in 2000 Years" class="ssl-item ep-item" data-number="1" data-id="2142" href="/watch/attack-on-titan-112?ep=2142">
                    <div class="ssli-order">1</div>
                </a>
            </div>
        "#;
        let markup =
            serde_json::json!({ "status": true, "html": html, "totalItems": 2 }).to_string();

        let episodes = extract_episodes(&markup);
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].number, 1);
        assert_eq!(episodes[0].id, "2142");
        assert_eq!(episodes[0].title, "To You, in 2000 Years");
        assert_eq!(episodes[1].number, 2);
        assert_eq!(episodes[1].id, "2143");
    }

    #[test]
    fn test_list_layout_uses_href_and_text() {
        let html = r#"
            <ul class="episodes-ul">
                <li class="episode"><a href="/watch/naruto-677?ep=12352">Episode 3: Sasuke</a></li>
                <li class="episode"><a href="/watch/naruto-677?ep=12350">Episode 1: Enter Naruto</a></li>
                <li class="episode"><a href="/watch/naruto-677?ep=12351">Episode 2</a></li>
            </ul>
        "#;
        let episodes = extract_episodes(html);
        let numbers: Vec<_> = episodes.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(episodes[0].id, "12350");
        assert_eq!(episodes[0].title, "Episode 1: Enter Naruto");
    }

    #[test]
    fn test_defaults_when_source_gives_nothing() {
        let html = r#"
            <ul class="episode-list">
                <li><span class="x"></span></li>
                <li><a href="/watch/x-1">Special</a></li>
            </ul>
        "#;
        let episodes = extract_episodes(html);
        assert_eq!(episodes.len(), 2);
        assert!(episodes.iter().all(|e| e.number == 1));
        assert_eq!(episodes[0].id, "ep_1");
        assert_eq!(episodes[0].title, "Episode 1");
        assert_eq!(episodes[1].id, "ep_2");
        assert_eq!(episodes[1].title, "Special");
    }

    #[test]
    fn test_title_fallback_order() {
        let html = r#"
            <a class="ep-item" data-number="1" data-id="1"><span class="ep-name" title="From Attr"></span></a>
            <a class="ep-item" data-number="2" data-id="2"><div class="epl-title">From Epl</div></a>
            <a class="ep-item" data-number="3" data-id="3" title="Own"><span class="ep-name">Name</span></a>
        "#;
        let titles: Vec<_> = extract_episodes(html).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["From Attr", "From Epl", "Own"]);

        let html = r#"<ul class="episodes-ul"><li><a title="From Anchor" href="/w?ep=5"></a></li></ul>"#;
        let episodes = extract_episodes(html);
        assert_eq!(episodes[0].title, "From Anchor");
        assert_eq!(episodes[0].id, "5");
    }

    #[test]
    fn test_non_numeric_data_number_falls_back_to_text() {
        let html = r#"<a class="ep-item" data-number="special" data-id="9">Ep 7</a>"#;
        let episodes = extract_episodes(html);
        assert_eq!(episodes[0].number, 7);
    }

    #[test]
    fn test_zero_is_clamped() {
        let html = r#"<a class="ep-item" data-number="0" data-id="9"></a>"#;
        assert_eq!(extract_episodes(html)[0].number, 1);
    }

    #[test]
    fn test_output_is_sorted_for_any_input_order() {
        let orders: [&[u32]; 4] = [&[5, 3, 9, 1], &[1, 2, 3], &[3, 2, 1], &[2, 2, 1, 10, 4]];
        for order in orders {
            let html: String = order
                .iter()
                .map(|n| format!(r#"<a class="ep-item" data-number="{n}" data-id="id{n}"></a>"#))
                .collect();
            let numbers: Vec<_> = extract_episodes(&html).iter().map(|e| e.number).collect();
            assert!(numbers.windows(2).all(|w| w[0] <= w[1]), "{numbers:?}");
            assert_eq!(numbers.len(), order.len());
        }
    }
}
