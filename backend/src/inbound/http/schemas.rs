//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
///
/// A stored user. The identifier is whatever the document store assigned:
/// usually a 24-character hex object id, occasionally a number.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(value_type = String, example = "65f1c0a4e4b0a1b2c3d4e5f6")]
    id: String,
    /// Name as submitted.
    #[schema(example = "Ada")]
    name: String,
    /// Email as submitted.
    #[schema(example = "ada@example.com")]
    email: String,
}

/// OpenAPI schema for the readiness probe body.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ReadinessSchema {
    /// `up` or `down`.
    #[schema(example = "up")]
    document_store: String,
    /// `up` or `down`.
    #[schema(example = "down")]
    search_index: String,
}
