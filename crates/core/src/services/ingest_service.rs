use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::models::sentiment::{SentimentCategory, SentimentRow};

/// Zero-width characters found in generated sentiment files: ZWSP, ZWNJ,
/// ZWJ, BOM and word joiner. `str::trim` does not remove them.
const INVISIBLES: [char; 5] = ['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}', '\u{2060}'];

/// Textual layout of a sentiment payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowFormat {
    /// Newline-separated `YYYY-MM-DD|score` lines (remote API).
    Pipe,
    /// CSV with a header naming `date` and `sentiment` columns (static files).
    Csv,
}

impl RowFormat {
    /// Guess the format of text of unknown origin: pipe if the first
    /// non-blank line contains `|`, CSV otherwise.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        match text.lines().map(str::trim).find(|l| !l.is_empty()) {
            Some(line) if line.contains('|') => RowFormat::Pipe,
            _ => RowFormat::Csv,
        }
    }
}

/// A candidate row before validation: the raw date and score text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub date: String,
    pub score: String,
}

impl RawRow {
    pub fn new(date: impl Into<String>, score: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            score: score.into(),
        }
    }
}

/// Turns fetched text into validated [`SentimentRow`]s.
///
/// Ingestion is best-effort: lines that do not yield a calendar date and a
/// score in `{0, 1, 2}` are dropped and logged at debug level, never
/// reported as errors. Source order is preserved.
pub struct IngestService;

impl IngestService {
    pub fn new() -> Self {
        Self
    }

    /// Split and normalize in one step.
    #[must_use]
    pub fn parse(&self, text: &str, format: RowFormat) -> Vec<SentimentRow> {
        let raw = self.split_rows(text, format);
        self.normalize(&raw)
    }

    #[must_use]
    pub fn split_rows(&self, text: &str, format: RowFormat) -> Vec<RawRow> {
        match format {
            RowFormat::Pipe => self.split_pipe(text),
            RowFormat::Csv => self.split_csv(text),
        }
    }

    /// Split `date|score` lines. Blank lines and lines without `|` are
    /// skipped; only the first `|` separates the fields.
    #[must_use]
    pub fn split_pipe(&self, text: &str) -> Vec<RawRow> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| match line.split_once('|') {
                Some((date, score)) => Some(RawRow::new(date.trim(), score.trim())),
                None => {
                    debug!(line, "dropping line without '|' separator");
                    None
                }
            })
            .collect()
    }

    /// Split a CSV payload using its header to locate the `date` and
    /// `sentiment` columns (case-insensitive). Quoted fields and `""`
    /// escapes are honored. Without both columns nothing is returned.
    #[must_use]
    pub fn split_csv(&self, text: &str) -> Vec<RawRow> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut records = reader
            .records()
            .filter_map(|record| match record {
                Ok(r) => Some(r),
                Err(e) => {
                    debug!(error = %e, "dropping unreadable CSV record");
                    None
                }
            })
            .filter(|r| r.iter().any(|field| !field.is_empty()));

        let Some(header) = records.next() else {
            return Vec::new();
        };
        let Some((date_idx, score_idx)) = header_columns(&header) else {
            debug!(header = ?header, "CSV header lacks date/sentiment columns");
            return Vec::new();
        };

        records
            .map(|r| {
                RawRow::new(
                    r.get(date_idx).unwrap_or_default(),
                    r.get(score_idx).unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Validate candidates, dropping any with a bad date or score.
    /// Zero-width characters are removed from both fields first.
    #[must_use]
    pub fn normalize(&self, raw: &[RawRow]) -> Vec<SentimentRow> {
        raw.iter()
            .filter_map(|r| {
                let Some(date) = Self::parse_date(&strip_invisibles(&r.date)) else {
                    debug!(date = %r.date, "dropping row with unparseable date");
                    return None;
                };
                let Some(score) = Self::parse_score(&strip_invisibles(&r.score)) else {
                    debug!(score = %r.score, %date, "dropping row with invalid score");
                    return None;
                };
                Some(SentimentRow::new(date, score))
            })
            .collect()
    }

    /// Parse a `YYYY-MM-DD` calendar date. No timezone is involved.
    #[must_use]
    pub fn parse_date(text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
    }

    /// Parse a score: a finite, integral number in `{0, 1, 2}`.
    /// `"1"` and `"1.0"` are accepted; `"abc"`, `"NaN"`, `"1.5"` are not.
    #[must_use]
    pub fn parse_score(text: &str) -> Option<SentimentCategory> {
        let value: f64 = text.trim().parse().ok()?;
        if !value.is_finite() || value.fract() != 0.0 || !(0.0..=2.0).contains(&value) {
            return None;
        }
        SentimentCategory::from_score(value as u8)
    }
}

impl Default for IngestService {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_invisibles(text: &str) -> String {
    text.chars().filter(|c| !INVISIBLES.contains(c)).collect()
}

fn header_columns(header: &StringRecord) -> Option<(usize, usize)> {
    let names: Vec<String> = header
        .iter()
        .map(|h| strip_invisibles(h).trim().to_lowercase())
        .collect();
    let date_idx = names.iter().position(|n| n == "date")?;
    let score_idx = names
        .iter()
        .position(|n| n == "sentiment" || n.starts_with("sentiment "))?;
    Some((date_idx, score_idx))
}
