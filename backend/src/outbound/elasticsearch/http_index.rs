//! Reqwest-backed `UserIndex` adapter.
//!
//! This adapter owns transport details only: URL construction, the client
//! timeout, and mapping HTTP failures into [`UserIndexError`] variants.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};

use crate::domain::ports::{UserIndex, UserIndexError};

/// Search index adapter posting documents to `{base}/{index}/_doc`.
#[derive(Clone)]
pub struct ElasticsearchUserIndex {
    client: Client,
    base_url: Url,
}

impl ElasticsearchUserIndex {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`UserIndexError::Transport`] when the base URL does not parse
    /// or the client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UserIndexError> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_transport_error)?;
        Ok(Self { client, base_url })
    }

    fn document_url(&self, index_name: &str) -> Result<Url, UserIndexError> {
        self.base_url
            .join(&format!("{index_name}/_doc"))
            .map_err(|err| UserIndexError::transport(format!("invalid index name: {err}")))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, UserIndexError> {
    // `Url::join` replaces the last path segment unless it ends with `/`.
    let normalised = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalised)
        .map_err(|err| UserIndexError::transport(format!("invalid search index URL: {err}")))
}

#[async_trait]
impl UserIndex for ElasticsearchUserIndex {
    async fn index(&self, index_name: &str, document: Vec<u8>) -> Result<(), UserIndexError> {
        let response = self
            .client
            .post(self.document_url(index_name)?)
            .header(CONTENT_TYPE, "application/json")
            .body(document)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }

    async fn ping(&self) -> Result<(), UserIndexError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.bytes().await.map_err(map_transport_error)?;
            Err(map_status_error(status, body.as_ref()))
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> UserIndexError {
    if error.is_timeout() {
        UserIndexError::transport(format!("request timed out: {error}"))
    } else {
        UserIndexError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserIndexError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    UserIndexError::rejected(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
