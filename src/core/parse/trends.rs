//! Parser for the trending-topics reply.
//!
//! Expects up to six `Category: Topic Name` lines; anything without a
//! colon is ignored. An empty result is the caller's cue to substitute
//! fallback data.

use super::clean_text;
use crate::core::model::TrendingTopic;

/// Maximum number of trending topics taken from a reply.
pub const MAX_TRENDS: usize = 6;

/// Extract an ordered list of up to [`MAX_TRENDS`] topics. Never fails;
/// malformed input just yields fewer (or zero) entries.
pub fn parse_trending(text: &str) -> Vec<TrendingTopic> {
    text.lines()
        .filter(|line| line.contains(':'))
        .take(MAX_TRENDS)
        .enumerate()
        .map(|(index, line)| {
            let (category, name) = line.split_once(':').unwrap_or((line, ""));
            let category = clean_text(category);
            let name = clean_text(name);
            TrendingTopic {
                id: format!("trend-{index}"),
                category: if category.is_empty() {
                    "General".to_string()
                } else {
                    category
                },
                // A line like "Topic only:" keeps the whole line as the name.
                name: if name.is_empty() { clean_text(line) } else { name },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_without_colon_dropped() {
        let text = "Tech: AI Boom\nSpace: Starship\ninvalid line\nClimate: Heatwave";
        let topics = parse_trending(text);
        assert_eq!(topics.len(), 3);
        assert_eq!(topics[0].id, "trend-0");
        assert_eq!(topics[1].id, "trend-1");
        assert_eq!(topics[2].id, "trend-2");
        assert_eq!(topics[0].category, "Tech");
        assert_eq!(topics[0].name, "AI Boom");
        assert_eq!(topics[2].name, "Heatwave");
    }

    #[test]
    fn test_truncated_to_six() {
        let text = (0..9)
            .map(|i| format!("Cat{i}: Topic {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let topics = parse_trending(&text);
        assert_eq!(topics.len(), MAX_TRENDS);
        assert_eq!(topics[5].name, "Topic 5");
    }

    #[test]
    fn test_split_on_first_colon_only() {
        let topics = parse_trending("Markets: Oil: Brent rises");
        assert_eq!(topics[0].category, "Markets");
        assert_eq!(topics[0].name, "Oil: Brent rises");
    }

    #[test]
    fn test_empty_category_defaults_to_general() {
        let topics = parse_trending(": Mystery Topic");
        assert_eq!(topics[0].category, "General");
        assert_eq!(topics[0].name, "Mystery Topic");
    }

    #[test]
    fn test_empty_name_falls_back_to_whole_line() {
        let topics = parse_trending("Sports:");
        assert_eq!(topics[0].category, "Sports");
        assert_eq!(topics[0].name, "Sports:");
    }

    #[test]
    fn test_bold_markers_cleaned() {
        let topics = parse_trending("**Tech**: **AI Boom**");
        assert_eq!(topics[0].category, "Tech");
        assert_eq!(topics[0].name, "AI Boom");
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        assert!(parse_trending("").is_empty());
        assert!(parse_trending("no separators here\nnone here either").is_empty());
    }
}
