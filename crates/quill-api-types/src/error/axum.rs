use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::{Error, ErrorCategory};

impl Error {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match &self.category {
            ErrorCategory::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCategory::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCategory::AccessDenied => StatusCode::UNAUTHORIZED,
            ErrorCategory::Forbidden => StatusCode::FORBIDDEN,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::LoginUserFailed(..) => StatusCode::FORBIDDEN,
            ErrorCategory::RegisterUserFailed(..) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoginUserFailed;

    #[test]
    fn maps_categories_to_documented_status_codes() {
        let cases = [
            (ErrorCategory::Unknown, StatusCode::INTERNAL_SERVER_ERROR),
            (ErrorCategory::InvalidRequest, StatusCode::BAD_REQUEST),
            (ErrorCategory::AccessDenied, StatusCode::UNAUTHORIZED),
            (ErrorCategory::Forbidden, StatusCode::FORBIDDEN),
            (ErrorCategory::NotFound, StatusCode::NOT_FOUND),
            (
                ErrorCategory::LoginUserFailed(LoginUserFailed::InvalidCredentials),
                StatusCode::FORBIDDEN,
            ),
        ];

        for (category, status) in cases {
            assert_eq!(Error::new(category).status_code(), status);
        }
    }
}
