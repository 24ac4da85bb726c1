use log::warn;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::services::enrichment::{EnrichConfig, DEFAULT_REFERENCE_BATCH_SIZE};
use crate::types::errors::ResolveError;

pub const DEFAULT_BASE_URL: &str = "https://api.sightmap.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CATALOG_CACHE_CAPACITY: usize = 4;

pub const ENV_API_KEY: &str = "ASSET_RESOLVER_API_KEY";
pub const ENV_BASE_URL: &str = "ASSET_RESOLVER_BASE_URL";
pub const ENV_BATCH_SIZE: &str = "ASSET_RESOLVER_BATCH_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "ASSET_RESOLVER_TIMEOUT_SECS";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
    /// Overrides the per-workflow catalog page size when set.
    pub catalog_page_size: Option<usize>,
    pub reference_batch_size: usize,
    pub catalog_cache_capacity: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            catalog_page_size: None,
            reference_batch_size: DEFAULT_REFERENCE_BATCH_SIZE,
            catalog_cache_capacity: DEFAULT_CATALOG_CACHE_CAPACITY,
        }
    }
}

impl ResolverSettings {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // Try to load .env, ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable numbers keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(api_key) = read(ENV_API_KEY) {
            settings.api_key = Some(api_key);
        }
        if let Some(base_url) = read(ENV_BASE_URL) {
            settings.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = read(ENV_BATCH_SIZE) {
            match raw.parse::<usize>() {
                Ok(size) if size > 0 => settings.reference_batch_size = size,
                _ => warn!("Ignoring {ENV_BATCH_SIZE}={raw:?}: expected a positive integer"),
            }
        }
        if let Some(raw) = read(ENV_TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => settings.request_timeout_secs = secs,
                _ => warn!("Ignoring {ENV_TIMEOUT_SECS}={raw:?}: expected a positive integer"),
            }
        }

        settings
    }

    /// Parse settings supplied by an embedding host; missing keys default.
    pub fn from_json(json: &str) -> Result<Self, ResolveError> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| ResolveError::Config(format!("Invalid settings: {e}")))?;
        Ok(settings)
    }

    /// Checks required before a network client can be built.
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
            return Err(ResolveError::Config(format!(
                "API key missing (set {ENV_API_KEY})"
            )));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ResolveError::Config(format!(
                "Base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ResolveError::Config("Request timeout must be positive".into()));
        }
        if self.reference_batch_size == 0 {
            return Err(ResolveError::Config("Batch size must be positive".into()));
        }
        if self.catalog_page_size == Some(0) {
            return Err(ResolveError::Config("Catalog page size must be positive".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn enrich_config(&self) -> EnrichConfig {
        EnrichConfig::with_batch_size(self.reference_batch_size)
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
