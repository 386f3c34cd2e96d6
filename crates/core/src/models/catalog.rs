use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

/// A tracked ticker and the last day its sentiment was filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEntry {
    pub ticker: String,
    pub last_updated: Option<NaiveDate>,
}

/// The list of tracked tickers, as published in `tickers_last_updated.json`.
///
/// The file is a JSON array of objects carrying `ticker` (or `symbol`) and
/// `lastUpdated` (or `last_updated`) in epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerCatalog {
    entries: Vec<TickerEntry>,
}

impl TickerCatalog {
    /// Parse the catalog. A non-array document is an error; malformed entries
    /// inside the array are skipped.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text)?;
        let items = value.as_array().ok_or_else(|| {
            CoreError::Deserialization("ticker catalog must be a JSON array".into())
        })?;

        let entries = items
            .iter()
            .filter_map(|item| {
                let obj = item.as_object()?;
                let ticker = obj
                    .get("ticker")
                    .or_else(|| obj.get("symbol"))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|t| !t.is_empty())?;
                let last_updated = obj
                    .get("lastUpdated")
                    .or_else(|| obj.get("last_updated"))
                    .and_then(epoch_ms)
                    .and_then(ms_to_utc_date);
                Some(TickerEntry {
                    ticker: ticker.to_uppercase(),
                    last_updated,
                })
            })
            .collect();

        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[TickerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn tickers(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.ticker.as_str()).collect()
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&TickerEntry> {
        let upper = ticker.trim().to_uppercase();
        self.entries.iter().find(|e| e.ticker == upper)
    }

    /// Tickers whose last update lags `today` by at least `min_gap_days`.
    /// Entries without a usable date are not reported.
    #[must_use]
    pub fn stale(&self, today: NaiveDate, min_gap_days: i64) -> Vec<&TickerEntry> {
        self.entries
            .iter()
            .filter(|e| {
                e.last_updated
                    .is_some_and(|d| (today - d).num_days() >= min_gap_days)
            })
            .collect()
    }
}

fn epoch_ms(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn ms_to_utc_date(ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.date_naive())
}
