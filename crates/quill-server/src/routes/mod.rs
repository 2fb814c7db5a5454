use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::error::{ApiError, ApiErrorCategory};
use crate::{middleware, pages, App};

mod v1;

/// Builds an [axum router] with every route of the Quill API.
///
/// [axum router]: axum::Router
pub fn build_axum_router(app: App) -> Router {
    Router::new()
        .nest("/api/v1", self::v1::build_axum_router(app.clone()))
        .layer(axum::middleware::from_fn_with_state(
            app,
            middleware::auth::catch_token,
        ))
        .layer(axum::middleware::from_fn(pages::map_error_pages))
        .method_not_allowed_fallback(method_not_allowed_route)
        .fallback(not_found_route)
}

async fn method_not_allowed_route() -> Response {
    ApiError::new(ApiErrorCategory::InvalidRequest).into_response()
}

async fn not_found_route(method: Method) -> Response {
    match method {
        Method::HEAD => StatusCode::NOT_FOUND.into_response(),
        // browsers get the static page, everyone else a plain 404
        _ => pages::not_found().await,
    }
}
