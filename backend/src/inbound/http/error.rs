//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while giving Actix
//! handlers one place that decides status codes, logs the internal cause,
//! and renders the short plain-text body callers are allowed to see.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCode::UnsupportedMethod => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::PersistenceFailure
        | ErrorCode::SerializationFailure
        | ErrorCode::IndexingFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_error(error: &Error) {
    let cause = error.cause().unwrap_or("no further detail");
    let trace_id = error.trace_id().unwrap_or("-");
    if error.code().is_client_error() {
        warn!(code = ?error.code(), %cause, %trace_id, "request rejected");
    } else {
        error!(code = ?error.code(), %cause, %trace_id, "request failed");
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_error(self);

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder
            .content_type(ContentType::plaintext())
            .body(self.message().to_owned())
    }
}
