//! MongoDB-backed `UserStore` adapter.
//!
//! This adapter owns driver details only: client construction, the
//! `users` collection handle, identifier normalisation, and error mapping.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{Bson, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde::Serialize;
use tracing::debug;

use super::MongoSettings;
use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{NewUser, UserId};

/// Collection that holds user records.
pub const USERS_COLLECTION: &str = "users";

const APP_NAME: &str = "users-backend";
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Stored shape of a user. The driver adds `_id` on insert.
#[derive(Debug, Serialize)]
struct UserDocument<'a> {
    name: &'a str,
    email: &'a str,
}

impl<'a> From<&'a NewUser> for UserDocument<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: user.name(),
            email: user.email(),
        }
    }
}

/// Document store adapter writing to the `users` collection.
#[derive(Clone)]
pub struct MongoUserStore {
    database: Database,
}

impl MongoUserStore {
    /// Build a client from `settings`.
    ///
    /// The driver connects lazily, so this only fails when the connection
    /// string cannot be parsed or the client cannot be constructed.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::Connection`] when the client cannot be built.
    pub async fn connect(settings: &MongoSettings) -> Result<Self, UserStoreError> {
        let connection_string = settings.connection_string();
        let mut options = ClientOptions::parse(connection_string.as_str())
            .await
            .map_err(|err| {
                UserStoreError::connection(format!("invalid connection settings: {}", err.kind))
            })?;
        options.app_name = Some(APP_NAME.to_owned());
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        let client = Client::with_options(options).map_err(map_driver_error)?;
        debug!(target = %settings.redacted_target(), "document store client created");
        Ok(Self {
            database: client.database(settings.database_name()),
        })
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserStoreError> {
        let collection: Collection<UserDocument<'_>> = self.database.collection(USERS_COLLECTION);
        let result = collection
            .insert_one(UserDocument::from(user))
            .await
            .map_err(map_driver_error)?;
        Ok(user_id_from_bson(result.inserted_id))
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(map_driver_error)
    }
}

/// Normalise the driver-assigned identifier.
///
/// Object ids become their 24-character hex form; integers stay numeric;
/// anything else is rendered as text.
fn user_id_from_bson(id: Bson) -> UserId {
    match id {
        Bson::ObjectId(oid) => UserId::text(oid.to_hex()),
        Bson::String(text) => UserId::text(text),
        Bson::Int32(value) => UserId::numeric(i64::from(value)),
        Bson::Int64(value) => UserId::numeric(value),
        other => UserId::text(other.to_string()),
    }
}

fn map_driver_error(err: MongoError) -> UserStoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => UserStoreError::connection(err.to_string()),
        _ => UserStoreError::write(err.to_string()),
    }
}
