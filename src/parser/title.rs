use regex::Regex;
use std::sync::OnceLock;

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes season/part qualifiers ("Season 2", "2nd Season", "Part II",
/// "Cour 2") from a title, wherever they appear.
///
/// Returns the trimmed original when stripping would leave nothing.
#[must_use]
pub fn strip_season_qualifiers(title: &str) -> String {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

    let patterns = PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"(?i)\b\d+(?:st|nd|rd|th)\s+season\b").expect("Invalid Regex"),
            Regex::new(r"(?i)\bseason\s*\d+\b").expect("Invalid Regex"),
            Regex::new(r"(?i)\bpart\s*(?:\d+|[ivx]+)\b").expect("Invalid Regex"),
            Regex::new(r"(?i)\bcour\s*\d+\b").expect("Invalid Regex"),
        ]
    });

    let mut result = title.to_string();
    for pattern in patterns {
        result = pattern.replace_all(&result, " ").to_string();
    }

    let stripped = collapse_whitespace(&result);
    let stripped = stripped.trim_end_matches([':', '-', '–', '—', ' ']).trim();

    if stripped.is_empty() {
        title.trim().to_string()
    } else {
        stripped.to_string()
    }
}

/// Lowercased alphanumeric word form used for strict title comparison.
#[must_use]
pub fn normalize_for_matching(title: &str) -> String {
    strip_season_qualifiers(title)
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_season_qualifiers() {
        assert_eq!(strip_season_qualifiers("Oshi no Ko 2nd Season"), "Oshi no Ko");
        assert_eq!(
            strip_season_qualifiers("My Hero Academia Season 5"),
            "My Hero Academia"
        );
        assert_eq!(strip_season_qualifiers("Re:Zero Part 2"), "Re:Zero");
        assert_eq!(strip_season_qualifiers("Vinland Saga Part II"), "Vinland Saga");
        assert_eq!(strip_season_qualifiers("Spy x Family Cour 2"), "Spy x Family");
        assert_eq!(
            strip_season_qualifiers("Attack on Titan Season 3 Part 2"),
            "Attack on Titan"
        );
        assert_eq!(strip_season_qualifiers("Call of the Night"), "Call of the Night");
    }

    #[test]
    fn test_strip_is_case_insensitive() {
        assert_eq!(strip_season_qualifiers("Dr. Stone SEASON 3"), "Dr. Stone");
        assert_eq!(strip_season_qualifiers("Mushoku Tensei part 2"), "Mushoku Tensei");
    }

    #[test]
    fn test_strip_trailing_separator() {
        assert_eq!(
            strip_season_qualifiers("Attack on Titan: Season 2"),
            "Attack on Titan"
        );
    }

    #[test]
    fn test_strip_keeps_non_qualifier_words() {
        assert_eq!(
            strip_season_qualifiers("Attack on Titan: The Final Season"),
            "Attack on Titan: The Final Season"
        );
        assert_eq!(strip_season_qualifiers("Season 2"), "Season 2");
    }

    #[test]
    fn test_normalize_for_matching() {
        assert_eq!(normalize_for_matching("Oshi no Ko 2nd Season"), "oshi no ko");
        assert_eq!(
            normalize_for_matching("Attack on Titan: Final Season"),
            "attack on titan final season"
        );
        assert_eq!(normalize_for_matching("Re:Zero"), "re zero");
    }
}
