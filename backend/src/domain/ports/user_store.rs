//! Driven port for the document store that owns user records.
//!
//! The store is the system of record: a user only exists once an adapter has
//! accepted the write and handed back an identifier.

use async_trait::async_trait;

use crate::domain::{NewUser, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum UserStoreError {
        /// The store could not be reached or no server was selectable.
        Connection { message: String } => "user store connection failed: {message}",
        /// The operation did not finish before its deadline.
        Timeout { message: String } => "user store timed out: {message}",
        /// The store answered but refused or failed the write.
        Write { message: String } => "user store write failed: {message}",
    }
}

impl UserStoreError {
    /// Whether the failure says the store itself is unreachable.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }
}

/// Port for persisting user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert `user` and return the identifier the store assigned to it.
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserStoreError>;

    /// Check that the store answers. Used at startup to report readiness.
    async fn ping(&self) -> Result<(), UserStoreError>;
}

/// Stand-in installed when no store client could be built at startup.
///
/// Every call fails with [`UserStoreError::Connection`] carrying the startup
/// failure, so requests fail at the persist step instead of the process
/// refusing to start.
#[derive(Debug, Clone)]
pub struct DisconnectedUserStore {
    reason: String,
}

impl DisconnectedUserStore {
    /// Record why the store is unavailable.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl UserStore for DisconnectedUserStore {
    async fn insert(&self, _user: &NewUser) -> Result<UserId, UserStoreError> {
        Err(UserStoreError::connection(self.reason.as_str()))
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        Err(UserStoreError::connection(self.reason.as_str()))
    }
}
