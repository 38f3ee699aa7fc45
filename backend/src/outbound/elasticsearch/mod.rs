//! Elasticsearch search index adapter over the REST API.

mod config;
mod http_index;

pub use config::ElasticsearchSettings;
pub use http_index::ElasticsearchUserIndex;
