pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod state;

use chrono::NaiveDate;
use models::{
    bucket::Granularity, chart::ChartData, selection::Selection, sentiment::SentimentRow,
    settings::Settings,
};
use providers::registry::ProviderRegistry;
use services::{
    aggregation_service::AggregationService,
    chart_service::ChartService,
    export_service::{ExportFormat, ExportService},
    fetch_service::{FetchService, LoadOutcome},
};
use state::store::{with_store, LoadPhase, SentimentStore, SharedStore};
use std::time::Duration;

use errors::CoreError;

/// Main entry point for the news sentiment core library.
/// Holds the shared state store and all services needed to operate on it.
///
/// Created once at application start and passed to every consumer; there is
/// no global state. Selection changes may overlap: only the most recent
/// one is ever applied to the store.
#[must_use]
pub struct SentimentDashboard {
    settings: Settings,
    store: SharedStore,
    fetch_service: FetchService,
    chart_service: ChartService,
    aggregation_service: AggregationService,
    export_service: ExportService,
}

impl std::fmt::Debug for SentimentDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("SentimentDashboard")
            .field("source", &self.settings.source)
            .field("ticker", &snapshot.ticker())
            .field("rows", &snapshot.rows().len())
            .field("phase", &snapshot.phase())
            .finish()
    }
}

impl SentimentDashboard {
    /// Create a dashboard with the default providers for `settings`.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let fetch_service = FetchService::from_settings(&settings);
        Ok(Self::build(settings, fetch_service))
    }

    /// Create a dashboard over a custom provider registry.
    pub fn with_registry(
        settings: Settings,
        registry: ProviderRegistry,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let fetch_service = FetchService::new(
            registry,
            settings.source,
            Duration::from_millis(settings.debounce_ms),
        );
        Ok(Self::build(settings, fetch_service))
    }

    fn build(settings: Settings, fetch_service: FetchService) -> Self {
        Self {
            settings,
            store: SentimentStore::shared(),
            fetch_service,
            chart_service: ChartService::new(),
            aggregation_service: AggregationService::new(),
            export_service: ExportService::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// React to a change of the exchange/ticker inputs.
    ///
    /// Debounced: if another change arrives before the delay elapses, this
    /// call returns [`LoadOutcome::Superseded`] without fetching.
    pub async fn select(&self, exchange: &str, ticker: &str) -> LoadOutcome {
        self.fetch_service.load(&self.store, exchange, ticker).await
    }

    /// Fetch rows for a selection without touching the store.
    pub async fn fetch_rows(&self, selection: &Selection) -> Result<Vec<SentimentRow>, CoreError> {
        self.fetch_service.fetch_rows(selection).await
    }

    /// Clear the selection and rows (explicit user action).
    pub fn reset(&self) {
        with_store(&self.store, SentimentStore::reset);
    }

    // ── State ───────────────────────────────────────────────────────

    /// Copy of the current store state.
    #[must_use]
    pub fn snapshot(&self) -> SentimentStore {
        with_store(&self.store, |s| s.clone())
    }

    #[must_use]
    pub fn rows(&self) -> Vec<SentimentRow> {
        with_store(&self.store, |s| s.rows().to_vec())
    }

    #[must_use]
    pub fn status(&self) -> String {
        with_store(&self.store, |s| s.status().to_string())
    }

    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        with_store(&self.store, |s| s.phase())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        with_store(&self.store, |s| s.is_loading())
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Render-ready data for `view` over the loaded rows.
    #[must_use]
    pub fn chart(&self, view: models::chart::ChartView, granularity: Granularity) -> ChartData {
        let rows = self.rows();
        self.chart_service.build(&rows, view, granularity)
    }

    /// Days inside the loaded span that have no sentiment row.
    #[must_use]
    pub fn missing_days(&self) -> Vec<NaiveDate> {
        let rows = self.rows();
        self.aggregation_service.missing_days(&rows)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Serialize the loaded rows in their current order.
    pub fn export(&self, format: ExportFormat) -> Result<String, CoreError> {
        let rows = self.rows();
        self.export_service.export(&rows, format)
    }

    /// Suggested download name for the loaded ticker, if one is selected.
    #[must_use]
    pub fn export_file_name(&self, format: ExportFormat) -> Option<String> {
        let ticker = with_store(&self.store, |s| s.ticker().to_string());
        if ticker.is_empty() {
            None
        } else {
            Some(self.export_service.file_name(&ticker, format))
        }
    }
}
