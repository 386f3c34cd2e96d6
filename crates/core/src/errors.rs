use thiserror::Error;

/// Unified error type for the entire news-sentiment-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Unparseable rows are never errors: they are dropped during ingestion.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Selection / Settings ────────────────────────────────────────
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No data found for {ticker} on {exchange}")]
    NoData {
        exchange: String,
        ticker: String,
    },

    #[error("No provider available for source: {0}")]
    NoProvider(String),

    // ── Formatting ──────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O ────────────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
}

impl CoreError {
    /// True for failures the dashboard reports as "no data" rather than a fault.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, CoreError::NoData { .. })
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; keep the path, drop the query.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
