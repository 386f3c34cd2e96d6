use chrono::NaiveDate;

use crate::models::bucket::{BucketCounts, BucketKey, BucketMap, Granularity};
use crate::models::chart::MajorityPoint;
use crate::models::sentiment::SentimentRow;

/// Buckets sentiment rows by calendar period and tallies categories.
///
/// Pure business logic over already-validated rows: every row lands in
/// exactly one bucket, so bucket totals always sum to the row count.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Count rows per bucket in a single pass. Keys iterate in date order.
    #[must_use]
    pub fn aggregate(&self, rows: &[SentimentRow], granularity: Granularity) -> BucketMap {
        let mut buckets = BucketMap::new();
        for row in rows {
            buckets
                .entry(BucketKey::for_date(row.date, granularity))
                .or_default()
                .record(row.score);
        }
        buckets
    }

    /// Day buckets covering every calendar day from the earliest to the
    /// latest row, inclusive. Days without rows get zero counts.
    #[must_use]
    pub fn day_range(&self, rows: &[SentimentRow]) -> BucketMap {
        let mut buckets = self.aggregate(rows, Granularity::Day);
        let Some((first, last)) = Self::date_span(rows) else {
            return buckets;
        };
        for day in first.iter_days().take_while(|d| *d <= last) {
            buckets
                .entry(BucketKey::for_date(day, Granularity::Day))
                .or_default();
        }
        buckets
    }

    /// Category totals over all rows.
    #[must_use]
    pub fn totals(&self, rows: &[SentimentRow]) -> BucketCounts {
        let mut counts = BucketCounts::default();
        for row in rows {
            counts.record(row.score);
        }
        counts
    }

    /// Majority class of each bucket, in key order.
    #[must_use]
    pub fn majority_series(&self, buckets: &BucketMap) -> Vec<MajorityPoint> {
        buckets
            .iter()
            .map(|(key, counts)| MajorityPoint {
                key: *key,
                counts: *counts,
                majority: counts.majority(),
            })
            .collect()
    }

    /// Calendar days inside the loaded span that have no row at all.
    #[must_use]
    pub fn missing_days(&self, rows: &[SentimentRow]) -> Vec<NaiveDate> {
        self.day_range(rows)
            .into_iter()
            .filter(|(_, counts)| counts.is_empty())
            .map(|(key, _)| key.start)
            .collect()
    }

    /// Earliest and latest row date, if any rows exist.
    #[must_use]
    pub fn date_span(rows: &[SentimentRow]) -> Option<(NaiveDate, NaiveDate)> {
        let first = rows.iter().map(|r| r.date).min()?;
        let last = rows.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
