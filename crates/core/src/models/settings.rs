use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

/// Where sentiment rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// `GET {base}/sentiment?exchange=..&ticker=..` returning `date|score` lines.
    Remote,
    /// Per-ticker `{data_dir}/{ticker}.csv` files with a `date,sentiment` header.
    Static,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Remote => write!(f, "remote"),
            DataSource::Static => write!(f, "static"),
        }
    }
}

impl std::str::FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" | "api" => Ok(DataSource::Remote),
            "static" | "file" | "csv" => Ok(DataSource::Static),
            other => Err(format!("unknown data source: {other}")),
        }
    }
}

/// Dashboard configuration.
///
/// Every field has a default, so a settings file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the sentiment API, without the `/sentiment` suffix.
    pub api_base_url: String,

    /// Directory holding the static `{ticker}.csv` files.
    pub data_dir: PathBuf,

    /// Which provider family to load from.
    pub source: DataSource,

    /// Quiet period after the last selection change before fetching.
    pub debounce_ms: u64,

    /// Per-request timeout for the remote provider.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            data_dir: PathBuf::from("assets/data"),
            source: DataSource::Remote,
            debounce_ms: 300,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.source == DataSource::Remote && self.api_base_url.trim().is_empty() {
            return Err(CoreError::InvalidSettings(
                "api_base_url must be set for the remote source".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidSettings(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
