//! Search index settings loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_INDEX_NAME;

const DEFAULT_URL: &str = "http://elasticsearch:9200";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration for the Elasticsearch REST endpoint.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ELASTICSEARCH")]
pub struct ElasticsearchSettings {
    /// Base URL of the cluster.
    #[ortho_config(default = String::from(DEFAULT_URL))]
    pub url: String,
    /// Index receiving user documents.
    pub index: Option<String>,
    /// Deadline for each index call, in milliseconds.
    #[ortho_config(default = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

impl ElasticsearchSettings {
    /// Return the base URL, falling back to the default.
    pub fn url(&self) -> &str {
        match self.url.trim() {
            "" => DEFAULT_URL,
            url => url,
        }
    }

    /// Return the index name, falling back to `users`.
    pub fn index(&self) -> &str {
        self.index
            .as_deref()
            .map(str::trim)
            .filter(|index| !index.is_empty())
            .unwrap_or(DEFAULT_INDEX_NAME)
    }

    /// Return the per-call deadline. Zero is treated as unset.
    pub fn timeout(&self) -> Duration {
        match self.timeout_ms {
            0 => Duration::from_millis(DEFAULT_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }
}
