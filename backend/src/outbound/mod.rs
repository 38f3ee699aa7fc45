//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **mongo**: MongoDB-backed [`crate::domain::ports::UserStore`]
//! - **elasticsearch**: REST-backed [`crate::domain::ports::UserIndex`]
//!
//! Adapters are thin translators between domain types and driver or wire
//! representations. They contain no business logic.

pub mod elasticsearch;
pub mod mongo;
