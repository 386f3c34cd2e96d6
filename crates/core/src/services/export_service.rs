use crate::errors::CoreError;
use crate::models::sentiment::SentimentRow;

/// Header row of exported CSV files.
pub const CSV_HEADER: [&str; 2] = ["Date", "Sentiment score"];

/// Download formats offered for the loaded rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Formats the current row sequence for download. Rows are written in
/// their in-memory order; nothing is sorted or deduplicated.
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, rows: &[SentimentRow], format: ExportFormat) -> Result<String, CoreError> {
        match format {
            ExportFormat::Csv => self.to_csv(rows),
            ExportFormat::Json => self.to_json(rows),
        }
    }

    /// `Date,Sentiment score` header, then one `YYYY-MM-DD,score` line per row.
    pub fn to_csv(&self, rows: &[SentimentRow]) -> Result<String, CoreError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;
        for row in rows {
            writer.write_record([
                row.date.format("%Y-%m-%d").to_string(),
                row.score.score().to_string(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Pretty-printed JSON array of `{"date": "YYYY-MM-DD", "score": n}`.
    pub fn to_json(&self, rows: &[SentimentRow]) -> Result<String, CoreError> {
        serde_json::to_string_pretty(rows).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Download file name, e.g. `aapl_sentiment.csv`.
    #[must_use]
    pub fn file_name(&self, ticker: &str, format: ExportFormat) -> String {
        format!(
            "{}_sentiment.{}",
            ticker.trim().to_lowercase(),
            format.extension()
        )
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
