use scraper::ElementRef;
use tracing::debug;

use super::{
    FieldStrategy, SidebarList, attr_at, first_field, own_attr, select_with_fallback, text_at,
    text_of,
};
use crate::models::RawItem;

/// Selector rules for one listing layout family.
struct ListingRules {
    containers: &'static [&'static str],
    title: &'static [FieldStrategy],
    link: &'static [FieldStrategy],
    extras: &'static [(&'static str, &'static [FieldStrategy])],
}

const SCHEDULE: ListingRules = ListingRules {
    containers: &["a.tsl-link", ".schedule-list li", "ul.ulclear li"],
    title: &[
        |n| text_at(n, ".film-name"),
        |n| attr_at(n, "[data-jname]", "data-jname"),
        |n| text_at(n, "h3"),
        |n| own_attr(n, "title"),
    ],
    link: &[|n| own_attr(n, "href"), |n| attr_at(n, "a", "href")],
    extras: &[
        ("time", &[|n| text_at(n, ".time"), |n| text_at(n, ".schedule-time")]),
        ("episode", &[|n| text_at(n, ".fd-play"), |n| text_at(n, ".btn-play")]),
    ],
};

const SEARCH_GRID: ListingRules = ListingRules {
    containers: &[
        ".film_list-wrap .flw-item",
        ".flw-item",
        ".film_list .item",
        ".anime-list .item",
    ],
    title: &[
        |n| text_at(n, ".film-name a"),
        |n| attr_at(n, ".film-name a", "title"),
        |n| text_at(n, ".dynamic-name"),
        |n| text_at(n, "a.name"),
        |n| attr_at(n, ".film-poster img", "alt"),
    ],
    link: &[
        |n| attr_at(n, ".film-name a", "href"),
        |n| attr_at(n, "a.film-poster-ahref", "href"),
        |n| attr_at(n, "a.name", "href"),
        |n| attr_at(n, "a", "href"),
    ],
    extras: &[
        (
            "thumbnail",
            &[
                |n| attr_at(n, ".film-poster img", "data-src"),
                |n| attr_at(n, "img", "data-src"),
                |n| attr_at(n, "img", "src"),
            ],
        ),
        ("type", &[|n| text_at(n, ".fd-infor .fdi-item")]),
        ("duration", &[|n| text_at(n, ".fd-infor .fdi-duration")]),
    ],
};

const TRENDING: ListingRules = ListingRules {
    containers: &["#anime-trending .item", "#trending-home .item", ".trending-list .item"],
    title: &[
        |n| text_at(n, ".number .film-title"),
        |n| text_at(n, ".film-title"),
        |n| attr_at(n, "a", "title"),
        |n| attr_at(n, "img", "alt"),
    ],
    link: &[
        |n| attr_at(n, ".number a", "href"),
        |n| attr_at(n, "a.film-poster", "href"),
        |n| attr_at(n, "a", "href"),
    ],
    extras: &[("rank", &[|n| text_at(n, ".number span")])],
};

const SIDEBAR_BLOCKS: &[&str] = &[".block_area-realtime", ".anif-block"];

const SIDEBAR_HEADING: &[FieldStrategy] = &[
    |n| text_at(n, ".main-heading"),
    |n| text_at(n, ".cat-heading"),
    |n| text_at(n, ".anif-block-header"),
];

const SIDEBAR: ListingRules = ListingRules {
    containers: &["ul li", ".item"],
    title: &[
        |n| text_at(n, ".film-name a"),
        |n| attr_at(n, ".film-name a", "title"),
        |n| text_at(n, ".film-name"),
    ],
    link: &[
        |n| attr_at(n, ".film-name a", "href"),
        |n| attr_at(n, "a", "href"),
    ],
    extras: &[(
        "rank",
        &[|n| text_at(n, ".film-number span"), |n| text_at(n, ".number span")],
    )],
};

fn build_item(node: ElementRef<'_>, rules: &ListingRules) -> Option<RawItem> {
    let Some(raw_link) = first_field(node, rules.link) else {
        debug!(node = %text_of(node), "skipping listing node without link");
        return None;
    };

    let Some(title) = first_field(node, rules.title) else {
        debug!(raw_link = %raw_link, "skipping listing node without title");
        return None;
    };

    let item = rules
        .extras
        .iter()
        .fold(RawItem::new(title, raw_link), |item, (key, chain)| {
            item.with_extra(key, first_field(node, chain))
        });

    Some(item)
}

fn collect_items(root: ElementRef<'_>, rules: &ListingRules) -> Vec<RawItem> {
    select_with_fallback(root, rules.containers)
        .into_iter()
        .filter_map(|node| build_item(node, rules))
        .collect()
}

pub(super) fn schedule(root: ElementRef<'_>) -> Vec<RawItem> {
    collect_items(root, &SCHEDULE)
}

pub(super) fn search_grid(root: ElementRef<'_>) -> Vec<RawItem> {
    collect_items(root, &SEARCH_GRID)
}

pub(super) fn trending(root: ElementRef<'_>) -> Vec<RawItem> {
    collect_items(root, &TRENDING)
}

/// Items of the sidebar block whose heading names `list`.
pub(super) fn sidebar(root: ElementRef<'_>, list: SidebarList) -> Vec<RawItem> {
    let term = list.heading();

    let block = select_with_fallback(root, SIDEBAR_BLOCKS)
        .into_iter()
        .find(|block| {
            first_field(*block, SIDEBAR_HEADING)
                .is_some_and(|heading| heading.to_lowercase().contains(&term))
        });

    match block {
        Some(block) => collect_items(block, &SIDEBAR),
        None => {
            debug!(list = %list, "sidebar block not found");
            Vec::new()
        }
    }
}
