use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use quill_api_types::routes::categories::CategoryPostsResponse;
use quill_api_types::routes::Pagination;

use super::morphers::{IntoApiCategoryData, IntoApiPostData};
use crate::error::ApiError;
use crate::extract::{Json, MaybeSessionUser};
use crate::services;
use crate::services::util::PageWindow;
use crate::App;

pub async fn list_categories(app: App) -> Result<Response, ApiError> {
    let response = services::categories::ListCategories
        .perform(&app)
        .await?
        .into_iter()
        .map(IntoApiCategoryData::into_api_category_data)
        .collect::<Vec<_>>();

    Ok(Json(response).into_response())
}

pub async fn list_category_posts(
    app: App,
    session_user: MaybeSessionUser,
    Path(slug): Path<String>,
    Query(pagination): Query<Pagination>,
) -> Result<Response, ApiError> {
    let request = services::categories::ListCategoryPosts {
        slug: &slug,
        window: PageWindow::new(&pagination),
    };

    let (category, posts) = request.perform(&app, &session_user.viewer()).await?;
    let response = CategoryPostsResponse {
        category: category.into_api_category_data(),
        posts: posts
            .into_iter()
            .map(IntoApiPostData::into_api_post_data)
            .collect(),
    };

    Ok(Json(response).into_response())
}

pub fn routes() -> Router<App> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:slug/posts", get(list_category_posts))
}
