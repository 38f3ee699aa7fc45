//! Driven port for the search index that mirrors user records.
//!
//! Documents arrive already serialised; the adapter only moves bytes and
//! reports whether the index accepted them.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by search index adapters.
    ///
    /// `Transport` covers failures before the index produced an answer
    /// (refused connections, timeouts). `Rejected` covers answers that say
    /// the document was not indexed.
    pub enum UserIndexError {
        /// The index could not be reached or did not answer in time.
        Transport { message: String } => "search index unreachable: {message}",
        /// The index answered with an error status.
        Rejected { status: u16, message: String } =>
            "search index rejected document with status {status}: {message}",
    }
}

/// Port for indexing serialised user documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserIndex: Send + Sync {
    /// Submit `document` (JSON bytes) to the index called `index_name`.
    async fn index(&self, index_name: &str, document: Vec<u8>) -> Result<(), UserIndexError>;

    /// Check that the index answers. Used at startup to report readiness.
    async fn ping(&self) -> Result<(), UserIndexError>;
}

/// Stand-in installed when no index client could be built at startup.
#[derive(Debug, Clone)]
pub struct DisconnectedUserIndex {
    reason: String,
}

impl DisconnectedUserIndex {
    /// Record why the index is unavailable.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl UserIndex for DisconnectedUserIndex {
    async fn index(&self, _index_name: &str, _document: Vec<u8>) -> Result<(), UserIndexError> {
        Err(UserIndexError::transport(self.reason.as_str()))
    }

    async fn ping(&self) -> Result<(), UserIndexError> {
        Err(UserIndexError::transport(self.reason.as_str()))
    }
}
