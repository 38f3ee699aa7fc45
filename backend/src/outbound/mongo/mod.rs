//! MongoDB document store adapter.

mod config;
mod user_store;

pub use config::MongoSettings;
pub use user_store::{MongoUserStore, USERS_COLLECTION};
