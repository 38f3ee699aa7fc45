//! Domain primitives, ports, and the registration use-case.
//!
//! Purpose: keep the dual-write flow independent of HTTP, MongoDB, and
//! Elasticsearch. Adapters in [`crate::inbound`] and [`crate::outbound`]
//! translate between those systems and the types defined here.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: failure taxonomy with caller-safe messages.
//! - `NewUser`, `User`, `UserId`: the user record before and after storage.
//! - `UserRegistrationService`: the persist-then-index pipeline.
//! - `BackendReadiness`: last known reachability of both backends.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod readiness;
pub mod response_delay;
pub mod trace_id;
pub mod user;
pub mod user_registration;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::readiness::BackendReadiness;
pub use self::response_delay::{
    FixedResponseDelay, RESPONSE_DELAY_MILLIS, RandomResponseDelay, ResponseDelay,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId};
pub use self::user_registration::{
    DEFAULT_INDEX_NAME, DEFAULT_INDEX_TIMEOUT, DEFAULT_PERSIST_TIMEOUT, RegistrationSettings,
    UserRegistrationService,
};
