//! Users backend library: stores users in MongoDB and mirrors them into
//! Elasticsearch behind a single `POST /users` endpoint.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
