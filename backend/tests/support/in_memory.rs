//! In-memory document store and search index shared by the integration
//! suites.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use users_backend::domain::NewUser;
use users_backend::domain::UserId;
use users_backend::domain::ports::{UserIndex, UserIndexError, UserStore, UserStoreError};

/// Store assigning sequential hex identifiers.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    pub(crate) records: Mutex<Vec<(UserId, NewUser)>>,
    pub(crate) offline: bool,
}

impl InMemoryStore {
    pub(crate) fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserStoreError> {
        if self.offline {
            return Err(UserStoreError::connection("server selection timed out"));
        }
        let mut records = self.records.lock().expect("store lock");
        let id = UserId::text(format!("{:024x}", records.len() + 1));
        records.push((id.clone(), user.clone()));
        Ok(id)
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        Ok(())
    }
}

/// Index recording each submitted document per index name.
#[derive(Default)]
pub(crate) struct InMemoryIndex {
    pub(crate) documents: Mutex<Vec<(String, Value)>>,
    pub(crate) offline: bool,
}

impl InMemoryIndex {
    pub(crate) fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl UserIndex for InMemoryIndex {
    async fn index(&self, index_name: &str, document: Vec<u8>) -> Result<(), UserIndexError> {
        if self.offline {
            return Err(UserIndexError::transport("connection refused"));
        }
        let parsed: Value = serde_json::from_slice(&document)
            .map_err(|err| UserIndexError::rejected(400_u16, err.to_string()))?;
        self.documents
            .lock()
            .expect("index lock")
            .push((index_name.to_owned(), parsed));
        Ok(())
    }

    async fn ping(&self) -> Result<(), UserIndexError> {
        Ok(())
    }
}
