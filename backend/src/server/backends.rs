//! Backend adapter construction for the server bootstrap.
//!
//! Startup is fail-open: when a client cannot be built or does not answer
//! its ping, the failure is logged and recorded in [`BackendReadiness`], and
//! the server starts anyway. A client that cannot be built is replaced by a
//! disconnected stand-in so each request fails at the matching step.

use std::sync::Arc;

use tracing::{error, info, warn};

use users_backend::domain::BackendReadiness;
use users_backend::domain::ports::{
    DisconnectedUserIndex, DisconnectedUserStore, UserIndex, UserStore,
};
use users_backend::outbound::elasticsearch::{ElasticsearchSettings, ElasticsearchUserIndex};
use users_backend::outbound::mongo::{MongoSettings, MongoUserStore};

/// Build the document store adapter and record whether it answered.
pub async fn connect_document_store(
    settings: &MongoSettings,
    readiness: &BackendReadiness,
) -> Arc<dyn UserStore> {
    let target = settings.redacted_target();
    let store: Arc<dyn UserStore> = match MongoUserStore::connect(settings).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            error!(error = %err, %target, "failed to create document store client");
            Arc::new(DisconnectedUserStore::new(err.to_string()))
        }
    };

    match store.ping().await {
        Ok(()) => {
            info!(%target, "connected to document store");
            readiness.set_document_store(true);
        }
        Err(err) => {
            warn!(error = %err, %target, "document store did not answer its startup ping");
            readiness.set_document_store(false);
        }
    }
    store
}

/// Build the search index adapter and record whether it answered.
pub async fn connect_search_index(
    settings: &ElasticsearchSettings,
    readiness: &BackendReadiness,
) -> Arc<dyn UserIndex> {
    let url = settings.url();
    let index: Arc<dyn UserIndex> = match ElasticsearchUserIndex::new(url, settings.timeout()) {
        Ok(index) => Arc::new(index),
        Err(err) => {
            error!(error = %err, %url, "failed to create search index client");
            Arc::new(DisconnectedUserIndex::new(err.to_string()))
        }
    };

    match index.ping().await {
        Ok(()) => {
            info!(%url, "connected to search index");
            readiness.set_search_index(true);
        }
        Err(err) => {
            warn!(error = %err, %url, "search index did not answer its startup ping");
            readiness.set_search_index(false);
        }
    }
    index
}
