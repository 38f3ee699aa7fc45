//! Health endpoints: liveness and readiness probes for orchestration and load
//! balancers.
//!
//! Readiness combines the server's own startup flag with the last known
//! reachability of both backends. A degraded backend turns the probe red
//! without stopping the process, so requests keep being served and fail at
//! the step that needs the missing backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

use crate::domain::BackendReadiness;

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    backends: Arc<BackendReadiness>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new(Arc::new(BackendReadiness::new()))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadinessBody {
    document_store: &'static str,
    search_index: &'static str,
}

fn state_label(reachable: bool) -> &'static str {
    if reachable { "up" } else { "down" }
}

impl HealthState {
    /// Create a state that is live but not yet ready.
    pub fn new(backends: Arc<BackendReadiness>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            backends,
        }
    }

    /// Mark the server as ready to accept traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether the server and both backends are ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire) && self.backends.is_ready()
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn readiness_body(&self) -> ReadinessBody {
        ReadinessBody {
            document_store: state_label(self.backends.document_store()),
            search_index: state_label(self.backends.search_index()),
        }
    }

    fn probe_response(probe_ok: bool) -> actix_web::HttpResponseBuilder {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response.insert_header((header::CACHE_CONTROL, "no-store"));
        response
    }
}

/// Readiness probe. Return 200 when the server and both backends are up;
/// return 503 otherwise. The body names the state of each backend.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = crate::inbound::http::schemas::ReadinessSchema),
        (status = 503, description = "Server or a backend is not ready", body = crate::inbound::http::schemas::ReadinessSchema)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready()).json(state.readiness_body())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive()).finish()
}
