use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::traits::SentimentProvider;
use crate::errors::CoreError;
use crate::models::selection::Selection;
use crate::models::settings::DataSource;
use crate::services::ingest_service::RowFormat;

/// Sentiment API provider.
///
/// - **Endpoint**: `GET {base}/sentiment?exchange={EXCHANGE}&ticker={TICKER}`
/// - **Response**: `text/plain`, one `YYYY-MM-DD|score` line per day.
/// - Any non-2xx status means "no data" for the ticker.
pub struct RemoteSentimentProvider {
    client: Client,
    base_url: String,
}

impl RemoteSentimentProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
        }
    }

    /// Full URL of the sentiment endpoint, without query parameters.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/sentiment", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SentimentProvider for RemoteSentimentProvider {
    fn name(&self) -> &str {
        "Sentiment API"
    }

    fn source(&self) -> DataSource {
        DataSource::Remote
    }

    fn format(&self) -> RowFormat {
        RowFormat::Pipe
    }

    async fn fetch_text(&self, selection: &Selection) -> Result<String, CoreError> {
        let resp = self
            .client
            .get(self.endpoint())
            .query(&[
                ("exchange", selection.exchange.as_str()),
                ("ticker", selection.ticker.as_str()),
            ])
            .header(ACCEPT, "text/plain")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            debug!(%status, %selection, "sentiment API returned non-success status");
            return Err(CoreError::NoData {
                exchange: selection.exchange.clone(),
                ticker: selection.ticker.clone(),
            });
        }

        resp.text().await.map_err(|e| CoreError::Api {
            provider: self.name().into(),
            message: format!("Failed to read response body for {selection}: {e}"),
        })
    }
}
