//! User registration service: the dual-write path.
//!
//! A registration runs a fixed pipeline:
//!
//! 1. insert the record into the document store, bounded by a deadline;
//! 2. attach the store-assigned identifier;
//! 3. serialise the record to JSON;
//! 4. submit the bytes to the search index, bounded by a deadline;
//! 5. pause for the simulated response delay.
//!
//! Any failure ends the pipeline. Nothing is retried and nothing is rolled
//! back, so a record can be stored yet missing from the index when step 4
//! fails. Reconciling that is left to operators.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    RegisteredUser, UserIndex, UserIndexError, UserRegistration, UserStore, UserStoreError,
};
use crate::domain::{
    BackendReadiness, Error, NewUser, RandomResponseDelay, ResponseDelay, User, UserId,
};

/// Deadline for the document store insert.
pub const DEFAULT_PERSIST_TIMEOUT: Duration = Duration::from_secs(10);
/// Deadline for the search index call.
pub const DEFAULT_INDEX_TIMEOUT: Duration = Duration::from_secs(10);
/// Index that receives user documents.
pub const DEFAULT_INDEX_NAME: &str = "users";

/// Tunables for [`UserRegistrationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSettings {
    /// Search index name.
    pub index_name: String,
    /// Deadline for the store insert.
    pub persist_timeout: Duration,
    /// Deadline for the index call.
    pub index_timeout: Duration,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_owned(),
            persist_timeout: DEFAULT_PERSIST_TIMEOUT,
            index_timeout: DEFAULT_INDEX_TIMEOUT,
        }
    }
}

/// Registration service implementing the [`UserRegistration`] driving port.
///
/// Both backends are injected at construction; the service holds no other
/// shared state apart from the readiness flags it updates.
pub struct UserRegistrationService<S: ?Sized, I: ?Sized> {
    store: Arc<S>,
    index: Arc<I>,
    delay: Arc<dyn ResponseDelay>,
    readiness: Arc<BackendReadiness>,
    settings: RegistrationSettings,
}

impl<S: ?Sized, I: ?Sized> UserRegistrationService<S, I> {
    /// Create a service with default settings and a random response delay.
    pub fn new(store: Arc<S>, index: Arc<I>) -> Self {
        Self {
            store,
            index,
            delay: Arc::new(RandomResponseDelay),
            readiness: Arc::new(BackendReadiness::new()),
            settings: RegistrationSettings::default(),
        }
    }

    /// Replace the simulated response delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Arc<dyn ResponseDelay>) -> Self {
        self.delay = delay;
        self
    }

    /// Share readiness flags with the health probes.
    #[must_use]
    pub fn with_readiness(mut self, readiness: Arc<BackendReadiness>) -> Self {
        self.readiness = readiness;
        self
    }

    /// Replace the index name and deadlines.
    #[must_use]
    pub fn with_settings(mut self, settings: RegistrationSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl<S, I> UserRegistrationService<S, I>
where
    S: UserStore + ?Sized,
    I: UserIndex + ?Sized,
{
    async fn persist(&self, user: &NewUser) -> Result<UserId, Error> {
        let deadline = self.settings.persist_timeout;
        let outcome = match tokio::time::timeout(deadline, self.store.insert(user)).await {
            Ok(result) => result,
            Err(_) => Err(UserStoreError::timeout(format!(
                "insert did not complete within {}ms",
                deadline.as_millis()
            ))),
        };

        match outcome {
            Ok(id) if id.is_empty() => {
                self.readiness.set_document_store(true);
                Err(Error::persistence_failure(
                    "document store returned a blank identifier",
                ))
            }
            Ok(id) => {
                self.readiness.set_document_store(true);
                Ok(id)
            }
            Err(err) => {
                if err.is_connectivity() {
                    self.readiness.set_document_store(false);
                }
                Err(Error::persistence_failure(err.to_string()))
            }
        }
    }

    fn serialize(user: &User) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(user)
            .map_err(|err| Error::serialization_failure(format!("failed to encode user: {err}")))
    }

    async fn mirror(&self, document: Vec<u8>) -> Result<(), Error> {
        let deadline = self.settings.index_timeout;
        let call = self.index.index(&self.settings.index_name, document);
        let outcome = match tokio::time::timeout(deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(UserIndexError::transport(format!(
                "index call did not complete within {}ms",
                deadline.as_millis()
            ))),
        };

        match outcome {
            Ok(()) => {
                self.readiness.set_search_index(true);
                Ok(())
            }
            Err(err @ UserIndexError::Transport { .. }) => {
                self.readiness.set_search_index(false);
                Err(Error::index_unreachable(err.to_string()))
            }
            Err(err @ UserIndexError::Rejected { .. }) => {
                self.readiness.set_search_index(true);
                Err(Error::index_rejected(err.to_string()))
            }
        }
    }
}

#[async_trait]
impl<S, I> UserRegistration for UserRegistrationService<S, I>
where
    S: UserStore + ?Sized,
    I: UserIndex + ?Sized,
{
    async fn register(&self, user: NewUser) -> Result<RegisteredUser, Error> {
        let id = self.persist(&user).await?;
        let user = user.with_id(id);

        let document = Self::serialize(&user)?;
        info!(
            user_id = %user.id(),
            document = %String::from_utf8_lossy(&document),
            "user stored"
        );

        if let Err(err) = self.mirror(document.clone()).await {
            warn!(
                user_id = %user.id(),
                index = %self.settings.index_name,
                "user stored but not indexed; index is missing this record"
            );
            return Err(err);
        }
        info!(user_id = %user.id(), index = %self.settings.index_name, "user indexed");

        let delay = self.delay.next_delay();
        info!(delay_ms = %delay.as_millis(), "applying simulated response delay");
        tokio::time::sleep(delay).await;

        Ok(RegisteredUser::new(user, document))
    }
}
