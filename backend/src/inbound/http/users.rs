//! User registration handler.
//!
//! ```text
//! POST /users {"name":"Ada","email":"ada@example.com"}
//! ```
//!
//! Any other method on `/users` answers `405 Method not allowed`.

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewUser};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::UserSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /users`.
///
/// Unknown fields, including a caller-supplied `id`, are ignored.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(value: CreateUserRequest) -> Self {
        Self::new(value.name, value.email)
    }
}

/// Largest request body accepted, matching the document store's 16 MiB
/// document limit.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Drain the request stream, refusing anything over [`MAX_BODY_BYTES`].
///
/// A refused or broken body is reported as invalid input so callers only ever
/// see the plain-text `400` rather than the framework's `413`.
async fn read_body(mut payload: web::Payload) -> Result<web::BytesMut, Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk
            .map_err(|err| Error::invalid_input(format!("failed to read request body: {err}")))?;
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(Error::invalid_input(format!(
                "request body exceeds {MAX_BODY_BYTES} bytes"
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn decode(body: &[u8]) -> Result<NewUser, Error> {
    serde_json::from_slice::<CreateUserRequest>(body)
        .map(NewUser::from)
        .map_err(|err| Error::invalid_input(format!("failed to decode request body: {err}")))
}

/// Register a user in the document store and the search index.
///
/// The response body is the exact JSON document that was indexed.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User stored and indexed", body = UserSchema),
        (status = 400, description = "Invalid input", body = String, content_type = "text/plain"),
        (status = 405, description = "Method not allowed", body = String, content_type = "text/plain"),
        (
            status = 500,
            description = "Store, serialisation, or index failure",
            body = String,
            content_type = "text/plain"
        )
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let body = read_body(payload).await?;
    let user = decode(&body)?;
    let registered = state.registration.register(user).await?;
    Ok(HttpResponse::Created()
        .content_type(ContentType::json())
        .body(registered.into_document()))
}

/// Fallback for every method other than `POST` on `/users`.
pub async fn method_not_allowed(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::unsupported_method(req.method()))
}

/// Register the `/users` resource.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_backend::inbound::http::users;
///
/// let _app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::post().to(create_user))
            .default_service(web::to(method_not_allowed)),
    );
}

#[cfg(test)]
mod tests;
