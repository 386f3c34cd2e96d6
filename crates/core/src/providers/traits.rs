use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::selection::Selection;
use crate::models::settings::DataSource;
use crate::services::ingest_service::RowFormat;

/// Trait abstraction for every source of sentiment payloads.
///
/// A provider only fetches text; parsing is shared by all providers and
/// lives in the ingest service. Swapping the backend touches one
/// implementation and nothing else.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Which data source this provider serves.
    fn source(&self) -> DataSource;

    /// Layout of the text returned by [`fetch_text`](Self::fetch_text).
    fn format(&self) -> RowFormat;

    /// Fetch the raw payload for a ticker.
    ///
    /// "Nothing for this ticker" is reported as [`CoreError::NoData`].
    async fn fetch_text(&self, selection: &Selection) -> Result<String, CoreError>;
}
