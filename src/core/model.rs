//! Core data model: sentiment records, trending topics, parse diagnostics.

use serde::{Deserialize, Serialize};

/// Lower bound of the sentiment score scale.
pub const SCORE_MIN: i32 = -100;
/// Upper bound of the sentiment score scale.
pub const SCORE_MAX: i32 = 100;

/// Coarse sentiment label assigned to a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Classification {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Classification {
    /// Parse a label case-insensitively. Returns `None` for anything other
    /// than the three recognized labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A web source cited by the grounded model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

impl GroundingSource {
    /// Host portion of the URI for compact display, falling back to the
    /// full URI when it does not parse as a URL.
    pub fn hostname(&self) -> String {
        url::Url::parse(&self.uri)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.uri.clone())
    }
}

/// A reply field that fell back to its default during parsing.
///
/// Diagnostic only: the record is still produced with the documented
/// substitutions, but callers can log or display a low-confidence note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseAnomaly {
    MissingClassification,
    UnrecognizedClassification,
    MissingScore,
    UnparsableScore,
    MissingSummary,
    NoKeyPoints,
}

impl ParseAnomaly {
    pub fn describe(self) -> &'static str {
        match self {
            Self::MissingClassification => "no CLASSIFICATION line",
            Self::UnrecognizedClassification => "unrecognized classification label",
            Self::MissingScore => "no SCORE value",
            Self::UnparsableScore => "unparsable SCORE value",
            Self::MissingSummary => "no SUMMARY section",
            Self::NoKeyPoints => "no key points",
        }
    }
}

/// One complete sentiment analysis parsed from a grounded model reply.
///
/// Immutable once constructed; the app replaces it wholesale on the next
/// analysis (or drops it on error).
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentRecord {
    pub topic: String,
    pub classification: Classification,
    /// Always within `[SCORE_MIN, SCORE_MAX]`.
    pub score: i32,
    pub summary: String,
    /// At most five entries, in reply order.
    pub key_points: Vec<String>,
    /// Cited web sources, in the order supplied. May be empty.
    pub sources: Vec<GroundingSource>,
    /// Local wall-clock display time stamped when the analysis completed.
    pub analyzed_at: String,
    /// Fields that fell back to defaults while parsing.
    pub anomalies: Vec<ParseAnomaly>,
}

/// A single trending topic card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingTopic {
    /// Positional id (`trend-0`, `trend-1`, ...); stable only within one fetch.
    pub id: String,
    pub name: String,
    pub category: String,
}
