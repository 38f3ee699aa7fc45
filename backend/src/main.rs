//! Backend entry-point: loads settings, connects both backends, and serves
//! the REST endpoints.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{
    ServerConfig, ServerSettings, connect_document_store, connect_search_index, drain_on,
    shutdown_signal,
};
use users_backend::domain::{BackendReadiness, RegistrationSettings, UserRegistrationService};
use users_backend::inbound::http::health::HealthState;
use users_backend::inbound::http::state::HttpState;
use users_backend::outbound::elasticsearch::ElasticsearchSettings;
use users_backend::outbound::mongo::MongoSettings;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let mongo = MongoSettings::load()
        .map_err(|err| eyre!("failed to load document store settings: {err}"))?;
    let elasticsearch = ElasticsearchSettings::load()
        .map_err(|err| eyre!("failed to load search index settings: {err}"))?;
    let server_settings =
        ServerSettings::load().map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let bind_addr = server_settings
        .bind_addr()
        .wrap_err("SERVER_BIND_ADDR is not a socket address")?;

    let readiness = Arc::new(BackendReadiness::new());
    let store = connect_document_store(&mongo, &readiness).await;
    let index = connect_search_index(&elasticsearch, &readiness).await;

    let registration = UserRegistrationService::new(store, index)
        .with_readiness(readiness.clone())
        .with_settings(RegistrationSettings {
            index_name: elasticsearch.index().to_owned(),
            index_timeout: elasticsearch.timeout(),
            ..RegistrationSettings::default()
        });

    let health_state = web::Data::new(HealthState::new(readiness));
    let http_state = web::Data::new(HttpState::new(Arc::new(registration)));
    let server =
        server::create_server(health_state.clone(), http_state, ServerConfig::new(bind_addr))
            .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));

    info!(%bind_addr, "server is running");
    server.await.wrap_err("server terminated with an error")
}
