use axum::response::{IntoResponse, Response};
use tracing::error;

pub use quill_api_types::ErrorCategory as ApiErrorCategory;

/// Server-side API error. Wraps the wire error object and absorbs
/// infrastructure failures at the handler boundary; details of those
/// are logged here and never serialized to clients.
#[derive(Debug)]
#[must_use]
pub struct ApiError(quill_api_types::Error);

impl ApiError {
    pub fn new(category: ApiErrorCategory) -> Self {
        Self(quill_api_types::Error::new(category))
    }

    pub fn unknown() -> Self {
        Self(quill_api_types::Error::unknown())
    }

    pub fn message(self, message: impl Into<String>) -> Self {
        Self(self.0.message(message))
    }

    #[must_use]
    pub fn category(&self) -> &ApiErrorCategory {
        &self.0.category
    }

    #[must_use]
    pub fn into_inner(self) -> quill_api_types::Error {
        self.0
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl From<quill_api_types::Error> for ApiError {
    fn from(value: quill_api_types::Error) -> Self {
        Self(value)
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(value: diesel::result::Error) -> Self {
        error!(error = %value, "caught database query error");
        Self::unknown()
    }
}

impl From<quill_postgres::error::AcquireError> for ApiError {
    fn from(value: quill_postgres::error::AcquireError) -> Self {
        error!(error = %value, "could not acquire a database connection");
        Self::unknown()
    }
}

impl From<crate::auth::password::HashPasswordError> for ApiError {
    fn from(value: crate::auth::password::HashPasswordError) -> Self {
        error!(error = %value, "could not hash password");
        Self::unknown()
    }
}

impl From<crate::auth::password::VerifyPasswordError> for ApiError {
    fn from(value: crate::auth::password::VerifyPasswordError) -> Self {
        error!(error = %value, "could not verify password");
        Self::unknown()
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(value: tokio::task::JoinError) -> Self {
        error!(error = %value, "background task failed");
        Self::unknown()
    }
}
