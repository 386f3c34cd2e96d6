use std::time::Duration;
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::selection::Selection;
use crate::models::sentiment::SentimentRow;
use crate::models::settings::{DataSource, Settings};
use crate::providers::registry::ProviderRegistry;
use crate::services::ingest_service::IngestService;
use crate::state::store::{with_store, LoadPhase, SharedStore};

/// What happened to one selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows were loaded into the store.
    Loaded(usize),
    /// The source answered but had no usable rows.
    Empty,
    /// The fetch failed; the store shows "no data".
    Failed,
    /// Exchange or ticker was blank; the store was cleared.
    InvalidSelection,
    /// A newer selection change arrived first; nothing was applied.
    Superseded,
}

/// Debounced, generation-tokened loading of sentiment rows into a store.
///
/// Each call stages its selection (bumping the store's generation), waits
/// out the debounce delay and only then fetches. A result is applied only
/// if no newer selection was staged meanwhile, so the last change wins
/// regardless of the order in which responses settle.
pub struct FetchService {
    registry: ProviderRegistry,
    ingest_service: IngestService,
    source: DataSource,
    debounce: Duration,
}

impl FetchService {
    pub fn new(registry: ProviderRegistry, source: DataSource, debounce: Duration) -> Self {
        Self {
            registry,
            ingest_service: IngestService::new(),
            source,
            debounce,
        }
    }

    /// Default providers, source and debounce delay from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            ProviderRegistry::new_with_defaults(settings),
            settings.source,
            Duration::from_millis(settings.debounce_ms),
        )
    }

    /// Handle one selection change end to end.
    pub async fn load(&self, store: &SharedStore, exchange: &str, ticker: &str) -> LoadOutcome {
        let Some(ticket) = with_store(store, |s| s.stage_selection(exchange, ticker)) else {
            debug!("selection incomplete, store cleared");
            return LoadOutcome::InvalidSelection;
        };

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }

        if !with_store(store, |s| s.begin_loading(&ticket)) {
            debug!(selection = %ticket.selection, "selection superseded during debounce");
            return LoadOutcome::Superseded;
        }

        let result = self.fetch_rows(&ticket.selection).await;

        with_store(store, |s| match result {
            Ok(rows) => {
                let count = rows.len();
                if !s.apply_rows(&ticket, rows) {
                    debug!(selection = %ticket.selection, "discarding stale result");
                    return LoadOutcome::Superseded;
                }
                if s.phase() == LoadPhase::Loaded {
                    info!(selection = %ticket.selection, rows = count, "sentiment loaded");
                    LoadOutcome::Loaded(count)
                } else {
                    info!(selection = %ticket.selection, "no usable rows");
                    LoadOutcome::Empty
                }
            }
            Err(e) => {
                if !s.apply_failure(&ticket) {
                    debug!(selection = %ticket.selection, "discarding stale failure");
                    return LoadOutcome::Superseded;
                }
                if e.is_no_data() {
                    info!(selection = %ticket.selection, "no data for selection");
                } else {
                    warn!(selection = %ticket.selection, error = %e, "sentiment load failed");
                }
                LoadOutcome::Failed
            }
        })
    }

    /// Fetch and parse rows for a selection, trying each provider of the
    /// configured source in order until one answers.
    pub async fn fetch_rows(&self, selection: &Selection) -> Result<Vec<SentimentRow>, CoreError> {
        let providers = self.registry.get_providers_for(self.source);
        if providers.is_empty() {
            return Err(CoreError::NoProvider(self.source.to_string()));
        }

        let mut last_error = None;
        for provider in &providers {
            match provider.fetch_text(selection).await {
                Ok(text) => {
                    let rows = self.ingest_service.parse(&text, provider.format());
                    debug!(provider = provider.name(), rows = rows.len(), "payload parsed");
                    return Ok(rows);
                }
                Err(e) => {
                    debug!(provider = provider.name(), error = %e, "provider failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::NoProvider(self.source.to_string())))
    }
}
