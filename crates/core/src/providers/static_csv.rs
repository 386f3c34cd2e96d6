use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::traits::SentimentProvider;
use crate::errors::CoreError;
use crate::models::selection::Selection;
use crate::models::settings::DataSource;
use crate::services::ingest_service::RowFormat;

/// Static per-ticker CSV files: `{data_dir}/{ticker}.csv`, lowercase name,
/// `date,sentiment` header. The exchange does not take part in the path.
pub struct StaticCsvProvider {
    data_dir: PathBuf,
}

impl StaticCsvProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn csv_path(&self, ticker: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.csv", ticker.trim().to_lowercase()))
    }
}

#[async_trait]
impl SentimentProvider for StaticCsvProvider {
    fn name(&self) -> &str {
        "Static CSV"
    }

    fn source(&self) -> DataSource {
        DataSource::Static
    }

    fn format(&self) -> RowFormat {
        RowFormat::Csv
    }

    async fn fetch_text(&self, selection: &Selection) -> Result<String, CoreError> {
        let path = self.csv_path(&selection.ticker);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CoreError::NoData {
                exchange: selection.exchange.clone(),
                ticker: selection.ticker.clone(),
            }),
            Err(e) => Err(CoreError::FileIO(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }
}
