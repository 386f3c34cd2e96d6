use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily sentiment category assigned to a ticker's news coverage.
///
/// Serialized as its numeric score (`0`, `1`, `2`) so exports and the
/// wire format stay identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SentimentCategory {
    Neutral,
    Positive,
    Negative,
}

impl SentimentCategory {
    /// Fixed stacking order used by every series builder.
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Neutral,
        SentimentCategory::Positive,
        SentimentCategory::Negative,
    ];

    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            SentimentCategory::Neutral => 0,
            SentimentCategory::Positive => 1,
            SentimentCategory::Negative => 2,
        }
    }

    #[must_use]
    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            0 => Some(SentimentCategory::Neutral),
            1 => Some(SentimentCategory::Positive),
            2 => Some(SentimentCategory::Negative),
            _ => None,
        }
    }

    /// Human-readable label for legends and table cells.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SentimentCategory::Neutral => "Neutral",
            SentimentCategory::Positive => "Positive",
            SentimentCategory::Negative => "Negative",
        }
    }
}

impl From<SentimentCategory> for u8 {
    fn from(category: SentimentCategory) -> Self {
        category.score()
    }
}

impl TryFrom<u8> for SentimentCategory {
    type Error = String;

    fn try_from(score: u8) -> Result<Self, Self::Error> {
        SentimentCategory::from_score(score)
            .ok_or_else(|| format!("sentiment score out of range: {score}"))
    }
}

impl std::fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One calendar day's sentiment for the loaded ticker.
///
/// Created once per valid line of a fetched payload and never mutated;
/// a new fetch replaces the whole row sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SentimentRow {
    pub date: NaiveDate,
    pub score: SentimentCategory,
}

impl SentimentRow {
    pub fn new(date: NaiveDate, score: SentimentCategory) -> Self {
        Self { date, score }
    }
}
