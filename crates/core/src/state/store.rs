use std::sync::{Arc, Mutex, PoisonError};

use crate::models::selection::Selection;
use crate::models::sentiment::SentimentRow;

/// Status shown while the exchange or ticker is missing.
pub const MISSING_SELECTION_STATUS: &str = "Select an exchange and enter a ticker.";

/// Where the store is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadPhase {
    /// Nothing requested yet (or explicitly reset).
    Idle,
    Loading,
    Loaded,
    /// No rows: missing selection, or the source had nothing usable.
    Empty,
    /// The fetch failed; rows were cleared.
    Failed,
}

/// Proof that a result belongs to a particular selection change.
///
/// Each change bumps the store's generation; a ticket whose generation is no
/// longer current is stale and its result is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub selection: Selection,
}

/// Single source of truth for the loaded ticker.
///
/// Rows are replaced wholesale on success and cleared on failure or on an
/// empty selection; they are never merged.
#[derive(Debug, Clone)]
pub struct SentimentStore {
    exchange: String,
    ticker: String,
    rows: Vec<SentimentRow>,
    loading: bool,
    status: String,
    phase: LoadPhase,
    generation: u64,
}

/// Store handle shared between the dashboard and in-flight loads.
pub type SharedStore = Arc<Mutex<SentimentStore>>;

impl SentimentStore {
    pub fn new() -> Self {
        Self {
            exchange: String::new(),
            ticker: String::new(),
            rows: Vec::new(),
            loading: false,
            status: String::new(),
            phase: LoadPhase::Idle,
            generation: 0,
        }
    }

    /// Wrap a fresh store for sharing.
    #[must_use]
    pub fn shared() -> SharedStore {
        Arc::new(Mutex::new(Self::new()))
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    #[must_use]
    pub fn rows(&self) -> &[SentimentRow] {
        &self.rows
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Record a selection change. Invalidates every outstanding ticket.
    ///
    /// Returns a ticket when both fields are non-empty after trimming;
    /// otherwise the store moves to `Empty` with its rows cleared.
    pub fn stage_selection(&mut self, exchange: &str, ticker: &str) -> Option<FetchTicket> {
        self.generation += 1;
        self.exchange = exchange.trim().to_uppercase();
        self.ticker = ticker.trim().to_uppercase();

        match Selection::parse(exchange, ticker) {
            Ok(selection) => Some(FetchTicket {
                generation: self.generation,
                selection,
            }),
            Err(_) => {
                self.settle(LoadPhase::Empty, Vec::new(), MISSING_SELECTION_STATUS.to_string());
                None
            }
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Enter `Loading` for a still-current ticket. Previous rows stay
    /// visible until the result arrives.
    pub fn begin_loading(&mut self, ticket: &FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = true;
        self.phase = LoadPhase::Loading;
        self.status = format!("Loading {}...", ticket.selection.ticker);
        true
    }

    /// Apply fetched rows. An empty result counts as "no data".
    /// Returns false, leaving state untouched, if the ticket is stale.
    pub fn apply_rows(&mut self, ticket: &FetchTicket, rows: Vec<SentimentRow>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let ticker = &ticket.selection.ticker;
        if rows.is_empty() {
            let status = no_data_status(ticker);
            self.settle(LoadPhase::Empty, Vec::new(), status);
        } else {
            let status = format!("{ticker} loaded: {} rows.", rows.len());
            self.settle(LoadPhase::Loaded, rows, status);
        }
        true
    }

    /// Apply a failed fetch: rows cleared, "no data" status.
    /// Returns false, leaving state untouched, if the ticket is stale.
    pub fn apply_failure(&mut self, ticket: &FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let status = no_data_status(&ticket.selection.ticker);
        self.settle(LoadPhase::Failed, Vec::new(), status);
        true
    }

    /// Back to `Idle` with everything cleared. Outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.exchange.clear();
        self.ticker.clear();
        self.settle(LoadPhase::Idle, Vec::new(), String::new());
    }

    fn settle(&mut self, phase: LoadPhase, rows: Vec<SentimentRow>, status: String) {
        self.loading = false;
        self.phase = phase;
        self.rows = rows;
        self.status = status;
    }
}

impl Default for SentimentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `f` with the store locked. The lock is never held across an await.
pub fn with_store<R>(store: &SharedStore, f: impl FnOnce(&mut SentimentStore) -> R) -> R {
    let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn no_data_status(ticker: &str) -> String {
    format!("No data found for {ticker}.")
}
