//! Parser for the structured sentiment reply.
//!
//! The model is asked for plain `CLASSIFICATION:` / `SCORE:` / `SUMMARY:` /
//! `KEY_POINTS:` sections, but replies drift: keys may be recased, wrapped
//! in bold markers, or missing entirely. Every field therefore has a
//! defined default and the parse itself never fails.

use once_cell::sync::Lazy;
use regex::Regex;

use super::clean_text;
use crate::core::model::{
    Classification, GroundingSource, ParseAnomaly, SentimentRecord, SCORE_MAX, SCORE_MIN,
};
use crate::core::provider::Citation;

/// Substituted when the reply carries no usable SUMMARY section.
const SUMMARY_FALLBACK: &str = "Analysis not available.";

/// Maximum number of key points kept from a reply.
const MAX_KEY_POINTS: usize = 5;

static CLASSIFICATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CLASSIFICATION:\s*([^\r\n]*)").unwrap());
static SCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)SCORE:\s*([+-]?\d+)").unwrap());
static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)SUMMARY:\s*(.*?)(?:KEY_POINTS:|\z)").unwrap());
static KEY_POINTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)KEY_POINTS:").unwrap());

/// Project a raw model reply plus its citation metadata into a
/// [`SentimentRecord`].
///
/// The timestamp is supplied by the caller so that identical inputs yield
/// identical records.
pub fn parse_sentiment(
    topic: &str,
    text: &str,
    citations: &[Citation],
    analyzed_at: String,
) -> SentimentRecord {
    let mut anomalies = Vec::new();

    let classification = match CLASSIFICATION_RE.captures(text) {
        Some(caps) => {
            let label = clean_text(&caps[1]);
            match Classification::from_label(&label) {
                Some(c) => c,
                None => {
                    anomalies.push(ParseAnomaly::UnrecognizedClassification);
                    Classification::Neutral
                }
            }
        }
        None => {
            anomalies.push(ParseAnomaly::MissingClassification);
            Classification::Neutral
        }
    };

    let score = match SCORE_RE.captures(text) {
        Some(caps) => match caps[1].parse::<i64>() {
            Ok(n) => n.clamp(SCORE_MIN as i64, SCORE_MAX as i64) as i32,
            Err(_) => {
                anomalies.push(ParseAnomaly::UnparsableScore);
                0
            }
        },
        None => {
            anomalies.push(ParseAnomaly::MissingScore);
            0
        }
    };

    let summary = match SUMMARY_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|s| !s.is_empty())
    {
        Some(s) => s,
        None => {
            anomalies.push(ParseAnomaly::MissingSummary);
            SUMMARY_FALLBACK.to_string()
        }
    };

    let key_points = extract_key_points(text);
    if key_points.is_empty() {
        anomalies.push(ParseAnomaly::NoKeyPoints);
    }

    // Keep only citations carrying both fields; order preserved, no dedup.
    let sources = citations
        .iter()
        .filter_map(|c| match (c.uri.as_deref(), c.title.as_deref()) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                Some(GroundingSource {
                    uri: uri.to_string(),
                    title: title.to_string(),
                })
            }
            _ => None,
        })
        .collect();

    SentimentRecord {
        topic: topic.to_string(),
        classification,
        score,
        summary,
        key_points,
        sources,
        analyzed_at,
        anomalies,
    }
}

/// Non-empty lines after the `KEY_POINTS:` marker, bullets stripped,
/// truncated to the first [`MAX_KEY_POINTS`].
fn extract_key_points(text: &str) -> Vec<String> {
    let Some(marker) = KEY_POINTS_RE.find(text) else {
        return Vec::new();
    };

    text[marker.end()..]
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .take(MAX_KEY_POINTS)
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim();
    if let Some(rest) = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('•'))
        .or_else(|| trimmed.strip_prefix("* "))
    {
        rest.trim_start()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(text: &str) -> SentimentRecord {
        parse_sentiment("Bitcoin", text, &[], "12:00:00".to_string())
    }

    const FULL_REPLY: &str = "\
CLASSIFICATION: Positive
SCORE: 72
SUMMARY: Markets are upbeat. Coverage is broadly favorable.
KEY_POINTS:
- Institutional adoption accelerating
- Regulatory clarity improving
- Retail interest climbing";

    #[test]
    fn test_full_reply() {
        let record = parse(FULL_REPLY);
        assert_eq!(record.classification, Classification::Positive);
        assert_eq!(record.score, 72);
        assert_eq!(
            record.summary,
            "Markets are upbeat. Coverage is broadly favorable."
        );
        assert_eq!(record.key_points.len(), 3);
        assert_eq!(record.key_points[0], "Institutional adoption accelerating");
        assert!(record.anomalies.is_empty());
    }

    #[rstest]
    #[case("CLASSIFICATION: Positive", Classification::Positive)]
    #[case("CLASSIFICATION: negative", Classification::Negative)]
    #[case("classification: NEUTRAL", Classification::Neutral)]
    #[case("CLASSIFICATION: **Positive**", Classification::Positive)]
    fn test_classification_labels(#[case] text: &str, #[case] expected: Classification) {
        assert_eq!(parse(text).classification, expected);
    }

    #[test]
    fn test_missing_classification_defaults_to_neutral() {
        let record = parse("SCORE: 10\nSUMMARY: fine");
        assert_eq!(record.classification, Classification::Neutral);
        assert!(record
            .anomalies
            .contains(&ParseAnomaly::MissingClassification));
    }

    #[test]
    fn test_unrecognized_classification_defaults_to_neutral() {
        let record = parse("CLASSIFICATION: Ecstatic\nSCORE: 10");
        assert_eq!(record.classification, Classification::Neutral);
        assert!(record
            .anomalies
            .contains(&ParseAnomaly::UnrecognizedClassification));
    }

    #[rstest]
    #[case("SCORE: 150", 100)]
    #[case("SCORE: -999", -100)]
    #[case("SCORE: 100", 100)]
    #[case("SCORE: -100", -100)]
    #[case("SCORE: 0", 0)]
    #[case("SCORE: +42", 42)]
    fn test_score_clamping(#[case] text: &str, #[case] expected: i32) {
        assert_eq!(parse(text).score, expected);
    }

    #[test]
    fn test_missing_score_is_zero() {
        let record = parse("CLASSIFICATION: Neutral");
        assert_eq!(record.score, 0);
        assert!(record.anomalies.contains(&ParseAnomaly::MissingScore));
    }

    #[test]
    fn test_overflowing_score_is_zero() {
        let record = parse("SCORE: 999999999999999999999999");
        assert_eq!(record.score, 0);
        assert!(record.anomalies.contains(&ParseAnomaly::UnparsableScore));
    }

    #[test]
    fn test_summary_stops_at_key_points_marker() {
        let record = parse("SUMMARY: First part.\nStill summary.\nKEY_POINTS:\n- a");
        assert_eq!(record.summary, "First part.\nStill summary.");
    }

    #[test]
    fn test_missing_summary_uses_placeholder() {
        let record = parse("CLASSIFICATION: Positive\nSCORE: 5");
        assert_eq!(record.summary, SUMMARY_FALLBACK);
        assert!(record.anomalies.contains(&ParseAnomaly::MissingSummary));
    }

    #[test]
    fn test_key_points_truncated_to_five_in_order() {
        let text = "KEY_POINTS:\n- one\n- two\n- three\n- four\n- five\n- six\n- seven\n- eight";
        let record = parse(text);
        assert_eq!(
            record.key_points,
            vec!["one", "two", "three", "four", "five"]
        );
    }

    #[test]
    fn test_key_points_bullet_variants_and_blank_lines() {
        let text = "KEY_POINTS:\n- dash\n\n• bullet\n* star\nbare line";
        let record = parse(text);
        assert_eq!(record.key_points, vec!["dash", "bullet", "star", "bare line"]);
    }

    #[test]
    fn test_no_key_points_anomaly() {
        let record = parse("SUMMARY: something");
        assert!(record.key_points.is_empty());
        assert!(record.anomalies.contains(&ParseAnomaly::NoKeyPoints));
    }

    #[test]
    fn test_citation_filtering() {
        let citations = vec![
            Citation {
                uri: Some("https://a.example/x".to_string()),
                title: Some("A".to_string()),
            },
            Citation {
                uri: None,
                title: Some("title only".to_string()),
            },
            Citation {
                uri: Some("https://c.example/y".to_string()),
                title: None,
            },
            Citation {
                uri: Some(String::new()),
                title: Some("empty uri".to_string()),
            },
            Citation {
                uri: Some("https://b.example/z".to_string()),
                title: Some("B".to_string()),
            },
        ];
        let record = parse_sentiment("x", FULL_REPLY, &citations, "12:00:00".to_string());
        assert_eq!(record.sources.len(), 2);
        assert_eq!(record.sources[0].title, "A");
        assert_eq!(record.sources[1].title, "B");
    }

    #[test]
    fn test_duplicate_citations_kept() {
        let citation = Citation {
            uri: Some("https://a.example/x".to_string()),
            title: Some("A".to_string()),
        };
        let citations = vec![citation.clone(), citation];
        let record = parse_sentiment("x", FULL_REPLY, &citations, "12:00:00".to_string());
        assert_eq!(record.sources.len(), 2);
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let citations = vec![Citation {
            uri: Some("https://a.example/x".to_string()),
            title: Some("A".to_string()),
        }];
        let first = parse_sentiment("Bitcoin", FULL_REPLY, &citations, "09:30:00".to_string());
        let second = parse_sentiment("Bitcoin", FULL_REPLY, &citations, "09:30:00".to_string());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_text_all_defaults() {
        let record = parse("");
        assert_eq!(record.classification, Classification::Neutral);
        assert_eq!(record.score, 0);
        assert_eq!(record.summary, SUMMARY_FALLBACK);
        assert!(record.key_points.is_empty());
        assert!(record.sources.is_empty());
        assert_eq!(record.anomalies.len(), 4);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn score_always_within_bounds(n in i64::MIN..i64::MAX) {
                let text = format!("SCORE: {n}");
                let record = parse_sentiment("t", &text, &[], String::new());
                prop_assert!(record.score >= SCORE_MIN && record.score <= SCORE_MAX);
            }

            #[test]
            fn parser_is_total(text in ".{0,512}") {
                let record = parse_sentiment("t", &text, &[], String::new());
                prop_assert!(record.key_points.len() <= MAX_KEY_POINTS);
                prop_assert!(record.score >= SCORE_MIN && record.score <= SCORE_MAX);
            }
        }
    }
}
