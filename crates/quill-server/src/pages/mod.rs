use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Static error pages served alongside the JSON API. Browsers hitting
/// an unknown path or a blocked resource get one of these instead of a
/// bare JSON error body.
static PAGE_403: &str = include_str!("templates/403.html");
static PAGE_404: &str = include_str!("templates/404.html");
static PAGE_500: &str = include_str!("templates/500.html");

/// Looks up the static page for a status code. Returns `None` for
/// codes that have no dedicated page.
pub fn dispatch(status: StatusCode) -> Option<Response> {
    let body = match status {
        StatusCode::FORBIDDEN => PAGE_403,
        StatusCode::NOT_FOUND => PAGE_404,
        StatusCode::INTERNAL_SERVER_ERROR => PAGE_500,
        _ => return None,
    };

    Some(
        (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            )],
            body,
        )
            .into_response(),
    )
}

/// Router fallback for paths no route matched.
pub async fn not_found() -> Response {
    // dispatch always knows 404
    dispatch(StatusCode::NOT_FOUND)
        .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
}

/// Response-mapping layer that swaps error responses for the static
/// pages when the client asked for HTML. API consumers keep the JSON
/// error bodies.
pub async fn map_error_pages(request: Request, next: Next) -> Response {
    let wants_html = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"));

    let response = next.run(request).await;
    if !wants_html {
        return response;
    }

    match dispatch(response.status()) {
        Some(page) => page,
        None => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_known_status_codes() {
        for status in [
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let response = dispatch(status).unwrap();
            assert_eq!(response.status(), status);

            let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
            assert_eq!(content_type, "text/html; charset=utf-8");
        }
    }

    #[test]
    fn ignores_other_status_codes() {
        assert!(dispatch(StatusCode::OK).is_none());
        assert!(dispatch(StatusCode::BAD_REQUEST).is_none());
        assert!(dispatch(StatusCode::UNAUTHORIZED).is_none());
    }

    mod layer {
        use super::*;
        use axum::body::Body;
        use axum::http::Request;
        use axum::routing::get;
        use axum::Router;
        use tower::ServiceExt;

        use crate::error::{ApiError, ApiErrorCategory};

        fn router() -> Router {
            Router::new()
                .route("/forbidden", get(|| async {
                    ApiError::new(ApiErrorCategory::Forbidden)
                }))
                .route("/fault", get(|| async { ApiError::unknown() }))
                .layer(axum::middleware::from_fn(map_error_pages))
        }

        async fn fetch(path: &str, accept: Option<&str>) -> Response {
            let mut request = Request::builder().uri(path);
            if let Some(accept) = accept {
                request = request.header(header::ACCEPT, accept);
            }

            router()
                .oneshot(request.body(Body::empty()).unwrap())
                .await
                .unwrap()
        }

        #[tokio::test]
        async fn html_clients_get_the_static_pages() {
            for (path, status) in [
                ("/forbidden", StatusCode::FORBIDDEN),
                ("/fault", StatusCode::INTERNAL_SERVER_ERROR),
            ] {
                let response = fetch(path, Some("text/html,*/*")).await;
                assert_eq!(response.status(), status);

                let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
                assert_eq!(content_type, "text/html; charset=utf-8");
            }
        }

        #[tokio::test]
        async fn api_clients_keep_the_json_error_bodies() {
            let response = fetch("/forbidden", None).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN);

            let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
            assert_eq!(content_type, "application/json");
        }
    }
}
