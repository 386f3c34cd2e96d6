use std::time::Duration;

use super::remote::RemoteSentimentProvider;
use super::static_csv::StaticCsvProvider;
use super::traits::SentimentProvider;
use crate::models::settings::{DataSource, Settings};

/// Registry of all available sentiment providers.
///
/// Routes requests to providers by [`DataSource`], in registration order.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn SentimentProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the remote API and the static files configured
    /// from `settings`.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();

        registry.register(Box::new(RemoteSentimentProvider::new(
            settings.api_base_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )));

        registry.register(Box::new(StaticCsvProvider::new(settings.data_dir.clone())));

        registry
    }

    /// Register a new provider.
    pub fn register(&mut self, provider: Box<dyn SentimentProvider>) {
        self.providers.push(provider);
    }

    /// Find the first provider serving the given source.
    pub fn get_provider_for(&self, source: DataSource) -> Option<&dyn SentimentProvider> {
        self.providers
            .iter()
            .find(|p| p.source() == source)
            .map(|p| p.as_ref())
    }

    /// Return ALL providers serving the given source, ordered by registration priority.
    /// Used for fallback: if the first provider fails, try the next one.
    pub fn get_providers_for(&self, source: DataSource) -> Vec<&dyn SentimentProvider> {
        self.providers
            .iter()
            .filter(|p| p.source() == source)
            .map(|p| p.as_ref())
            .collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
