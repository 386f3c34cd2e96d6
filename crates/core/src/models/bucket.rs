use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::sentiment::SentimentCategory;

/// Bucket width used when grouping rows by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Month => write!(f, "month"),
            Granularity::Year => write!(f, "year"),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "yearly" => Ok(Granularity::Year),
            other => Err(format!("unknown granularity: {other}")),
        }
    }
}

/// Grouping key for a bucket: the granularity plus the first calendar day
/// the bucket covers.
///
/// Ordering follows `start`, so a `BTreeMap<BucketKey, _>` iterates in
/// ascending date order. Keys of different granularities are never mixed
/// in one map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketKey {
    pub granularity: Granularity,
    pub start: NaiveDate,
}

impl BucketKey {
    /// Key of the bucket containing `date`.
    #[must_use]
    pub fn for_date(date: NaiveDate, granularity: Granularity) -> Self {
        let start = match granularity {
            Granularity::Day => date,
            // Day 1 of an existing month/year always exists; fall back to the date itself.
            Granularity::Month => date.with_day(1).unwrap_or(date),
            Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        };
        Self { granularity, start }
    }

    /// Label in the form the views print: `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Day => self.start.format("%Y-%m-%d").to_string(),
            Granularity::Month => self.start.format("%Y-%m").to_string(),
            Granularity::Year => self.start.format("%Y").to_string(),
        }
    }
}

impl Ord for BucketKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start
            .cmp(&other.start)
            .then(self.granularity.cmp(&other.granularity))
    }
}

impl PartialOrd for BucketKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-category tallies for one bucket.
///
/// Invariant: `total()` equals the number of rows mapped to the bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketCounts {
    pub neutral: u32,
    pub positive: u32,
    pub negative: u32,
}

impl BucketCounts {
    pub fn new(neutral: u32, positive: u32, negative: u32) -> Self {
        Self {
            neutral,
            positive,
            negative,
        }
    }

    /// Count one more row of `category`.
    pub fn record(&mut self, category: SentimentCategory) {
        match category {
            SentimentCategory::Neutral => self.neutral += 1,
            SentimentCategory::Positive => self.positive += 1,
            SentimentCategory::Negative => self.negative += 1,
        }
    }

    #[must_use]
    pub fn get(&self, category: SentimentCategory) -> u32 {
        match category {
            SentimentCategory::Neutral => self.neutral,
            SentimentCategory::Positive => self.positive,
            SentimentCategory::Negative => self.negative,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.neutral + self.positive + self.negative
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Majority classification: the category with the strictly largest count.
    /// Any tie for the top count, including an empty bucket, is Neutral.
    #[must_use]
    pub fn majority(&self) -> SentimentCategory {
        let top = self.neutral.max(self.positive).max(self.negative);
        let leaders: Vec<SentimentCategory> = SentimentCategory::ALL
            .into_iter()
            .filter(|c| self.get(*c) == top)
            .collect();
        match leaders.as_slice() {
            [only] => *only,
            _ => SentimentCategory::Neutral,
        }
    }
}

impl std::ops::AddAssign for BucketCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.neutral += rhs.neutral;
        self.positive += rhs.positive;
        self.negative += rhs.negative;
    }
}

/// Buckets in ascending date order.
pub type BucketMap = std::collections::BTreeMap<BucketKey, BucketCounts>;
