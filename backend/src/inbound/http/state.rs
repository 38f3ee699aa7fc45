//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the driving port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserRegistration;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
}

impl HttpState {
    /// Construct state from the registration use-case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_backend::domain::ports::{DisconnectedUserIndex, DisconnectedUserStore};
    /// use users_backend::domain::UserRegistrationService;
    /// use users_backend::inbound::http::state::HttpState;
    ///
    /// let service = UserRegistrationService::new(
    ///     Arc::new(DisconnectedUserStore::new("offline")),
    ///     Arc::new(DisconnectedUserIndex::new("offline")),
    /// );
    /// let _state = HttpState::new(Arc::new(service));
    /// ```
    pub fn new(registration: Arc<dyn UserRegistration>) -> Self {
        Self { registration }
    }
}
