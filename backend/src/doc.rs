//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the create-user endpoint, the health probes, and the
//! schema wrappers from [`crate::inbound::http::schemas`].

use crate::inbound::http::schemas::{ReadinessSchema, UserSchema};
use crate::inbound::http::users::CreateUserRequest;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users backend API",
        description = "Stores users in MongoDB and mirrors them into Elasticsearch."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, CreateUserRequest, ReadinessSchema)),
    tags(
        (name = "users", description = "User registration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
