//! Domain-level error type for the user registration flow.
//!
//! Errors are transport agnostic. Each one carries a stable [`ErrorCode`],
//! the short public message a caller is allowed to see, and an optional
//! internal cause that is only ever written to the logs. The HTTP adapter
//! decides how to render them.

use std::fmt;

use serde::Serialize;

use super::TraceId;

/// Public message for undecodable request bodies.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input";
/// Public message for requests using anything other than `POST`.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
/// Public message when the document store write fails.
pub const PERSISTENCE_FAILURE_MESSAGE: &str = "Failed to save to MongoDB";
/// Public message when the stored record cannot be serialized.
pub const SERIALIZATION_FAILURE_MESSAGE: &str = "Failed to process data";
/// Public message when the search index cannot be reached.
pub const INDEX_UNREACHABLE_MESSAGE: &str = "Failed to save to Elasticsearch";
/// Public message when the search index rejects the document.
pub const INDEX_REJECTED_MESSAGE: &str = "Failed to index user";

/// Stable machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request body did not decode into a user record.
    InvalidInput,
    /// The route does not support the request method.
    UnsupportedMethod,
    /// The document store could not be reached, timed out, or refused the write.
    PersistenceFailure,
    /// The stored record could not be turned into bytes for indexing.
    SerializationFailure,
    /// The search index was unreachable or rejected the document.
    IndexingFailure,
}

impl ErrorCode {
    /// Whether the caller, rather than the infrastructure, is at fault.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self, Self::InvalidInput | Self::UnsupportedMethod)
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use users_backend::domain::{Error, ErrorCode};
///
/// let err = Error::persistence_failure("server selection timeout");
/// assert_eq!(err.code(), ErrorCode::PersistenceFailure);
/// assert_eq!(err.message(), "Failed to save to MongoDB");
/// assert_eq!(err.cause(), Some("server selection timeout"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    cause: Option<String>,
    trace_id: Option<String>,
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The public message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// # Panics
    /// Panics when `message` is blank. Every call site in this crate passes
    /// one of the non-empty message constants.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message and captures the
    /// trace identifier in scope, if any.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            cause: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message safe to return to the caller.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Internal detail for logs. Never rendered to callers.
    #[must_use]
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Trace identifier captured when the error was created.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach an internal cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// The request body could not be decoded.
    pub fn invalid_input(cause: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, INVALID_INPUT_MESSAGE).with_cause(cause)
    }

    /// The route was called with an unsupported method.
    pub fn unsupported_method(method: impl fmt::Display) -> Self {
        Self::new(ErrorCode::UnsupportedMethod, METHOD_NOT_ALLOWED_MESSAGE)
            .with_cause(format!("method {method} is not supported"))
    }

    /// The document store write failed.
    pub fn persistence_failure(cause: impl Into<String>) -> Self {
        Self::new(ErrorCode::PersistenceFailure, PERSISTENCE_FAILURE_MESSAGE).with_cause(cause)
    }

    /// The stored record could not be serialized.
    pub fn serialization_failure(cause: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationFailure, SERIALIZATION_FAILURE_MESSAGE)
            .with_cause(cause)
    }

    /// The search index could not be reached.
    pub fn index_unreachable(cause: impl Into<String>) -> Self {
        Self::new(ErrorCode::IndexingFailure, INDEX_UNREACHABLE_MESSAGE).with_cause(cause)
    }

    /// The search index answered but refused the document.
    pub fn index_rejected(cause: impl Into<String>) -> Self {
        Self::new(ErrorCode::IndexingFailure, INDEX_REJECTED_MESSAGE).with_cause(cause)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {cause}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}
