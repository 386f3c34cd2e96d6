use serde::{Deserialize, Serialize};

use super::bucket::BucketKey;
use super::sentiment::SentimentCategory;

/// Baseline policy for stacked layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackOffset {
    /// Cumulative sum from zero (bar/column views).
    Zero,
    /// Streamgraph baseline that minimizes layer slope changes.
    Wiggle,
}

/// One stacked segment: bucket `key`, category, bottom `y0` and top `y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub key: BucketKey,
    pub y0: f64,
    pub y1: f64,
    pub category: SentimentCategory,
}

impl SeriesPoint {
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// All points of one category, in bucket order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesLayer {
    pub category: SentimentCategory,
    pub points: Vec<SeriesPoint>,
}

/// Stacked layout over an ordered list of buckets.
///
/// `layers` always holds one layer per category in the order
/// `[neutral, positive, negative]`; `domain` is `(min y0, max y1)` over the
/// whole series, or `(0.0, 0.0)` when there are no buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedSeries {
    pub offset: StackOffset,
    pub keys: Vec<BucketKey>,
    pub layers: Vec<SeriesLayer>,
    pub domain: (f64, f64),
}

impl StackedSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Every point, layer by layer.
    pub fn points(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.layers.iter().flat_map(|l| l.points.iter())
    }

    #[must_use]
    pub fn layer(&self, category: SentimentCategory) -> Option<&SeriesLayer> {
        self.layers.iter().find(|l| l.category == category)
    }
}
