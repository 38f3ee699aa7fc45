//! Last known reachability of the two backing services.
//!
//! Startup connectivity failures do not stop the process. They are recorded
//! here instead, where the readiness probe can report them. The registration
//! service keeps the flags current as requests succeed or fail against each
//! backend, so a backend that comes up after boot turns the probe green on
//! first use.

use std::sync::atomic::{AtomicBool, Ordering};

/// Reachability flags for the document store and the search index.
///
/// Both start as unreachable until a ping or a request proves otherwise.
#[derive(Debug, Default)]
pub struct BackendReadiness {
    document_store: AtomicBool,
    search_index: AtomicBool,
}

impl BackendReadiness {
    /// Create readiness with both backends unconfirmed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether the document store answered.
    pub fn set_document_store(&self, reachable: bool) {
        self.document_store.store(reachable, Ordering::Release);
    }

    /// Record whether the search index answered.
    pub fn set_search_index(&self, reachable: bool) {
        self.search_index.store(reachable, Ordering::Release);
    }

    /// Last known document store reachability.
    #[must_use]
    pub fn document_store(&self) -> bool {
        self.document_store.load(Ordering::Acquire)
    }

    /// Last known search index reachability.
    #[must_use]
    pub fn search_index(&self) -> bool {
        self.search_index.load(Ordering::Acquire)
    }

    /// Whether both backends are believed reachable.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.document_store() && self.search_index()
    }
}
