//! Driving port for registering users.
//!
//! Inbound adapters call this port without knowing which stores sit behind
//! it, which keeps HTTP handler tests free of I/O.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User};

/// Outcome of a successful registration.
///
/// Carries the stored record and the exact bytes that were sent to the
/// search index, so callers can echo the same representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    user: User,
    document: Vec<u8>,
}

impl RegisteredUser {
    /// Pair a stored user with its serialised form.
    #[must_use]
    pub fn new(user: User, document: Vec<u8>) -> Self {
        Self { user, document }
    }

    /// The stored user.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// JSON bytes that were indexed.
    #[must_use]
    pub fn document(&self) -> &[u8] {
        &self.document
    }

    /// Take ownership of the indexed JSON bytes.
    #[must_use]
    pub fn into_document(self) -> Vec<u8> {
        self.document
    }
}

/// Use-case port for the create-user flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Persist `user`, mirror it into the search index, and return it with
    /// its assigned identifier.
    async fn register(&self, user: NewUser) -> Result<RegisteredUser, Error>;
}
