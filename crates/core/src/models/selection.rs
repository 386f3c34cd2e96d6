use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A validated exchange/ticker pair.
///
/// Both fields are trimmed and uppercased; neither is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub exchange: String,
    pub ticker: String,
}

impl Selection {
    /// Build a selection from raw user input.
    pub fn parse(exchange: &str, ticker: &str) -> Result<Self, CoreError> {
        let exchange = exchange.trim().to_uppercase();
        let ticker = ticker.trim().to_uppercase();
        if exchange.is_empty() {
            return Err(CoreError::InvalidSelection("exchange is empty".into()));
        }
        if ticker.is_empty() {
            return Err(CoreError::InvalidSelection("ticker is empty".into()));
        }
        Ok(Self { exchange, ticker })
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.exchange, self.ticker)
    }
}
