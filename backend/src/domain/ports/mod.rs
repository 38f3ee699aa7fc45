//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UserStore`], [`UserIndex`]) describe the two backing
//! services. The driving port ([`UserRegistration`]) is what inbound adapters
//! call. Driven ports expose typed errors so adapters map their failures
//! into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod user_index;
mod user_registration;
mod user_store;

#[cfg(test)]
pub use user_index::MockUserIndex;
pub use user_index::{DisconnectedUserIndex, UserIndex, UserIndexError};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::{RegisteredUser, UserRegistration};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{DisconnectedUserStore, UserStore, UserStoreError};
