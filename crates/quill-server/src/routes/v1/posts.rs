use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use quill_api_types::routes::posts::{CreatePost, UpdatePost};
use quill_api_types::routes::Pagination;
use quill_model::id::{CategoryId, LocationId, PostId};

use super::morphers::IntoApiPostData;
use crate::error::ApiError;
use crate::extract::{Json, MaybeSessionUser, SessionUser};
use crate::services;
use crate::services::util::PageWindow;
use crate::App;

pub async fn list_posts(
    app: App,
    session_user: MaybeSessionUser,
    Query(pagination): Query<Pagination>,
) -> Result<Response, ApiError> {
    let request = services::posts::ListPosts {
        window: PageWindow::new(&pagination),
    };

    let response = request
        .perform(&app, &session_user.viewer())
        .await?
        .into_iter()
        .map(IntoApiPostData::into_api_post_data)
        .collect::<Vec<_>>();

    Ok(Json(response).into_response())
}

pub async fn get_post(
    app: App,
    session_user: MaybeSessionUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let request = services::posts::GetPost { id: PostId(id) };

    let view = request.perform(&app, &session_user.viewer()).await?;
    Ok(Json(view.into_api_post_data()).into_response())
}

pub async fn create_post(
    app: App,
    session_user: SessionUser,
    Json(data): Json<CreatePost>,
) -> Result<Response, ApiError> {
    let request = services::posts::CreatePost {
        title: &data.title,
        text: &data.text,
        pub_date: data.pub_date,
        category_id: data.category_id.map(CategoryId),
        location_id: data.location_id.map(LocationId),
        image: data.image.as_deref(),
        tags: &data.tags,
        is_published: data.is_published,
    };

    let view = request.perform(&app, &session_user).await?;
    Ok((StatusCode::CREATED, Json(view.into_api_post_data())).into_response())
}

pub async fn update_post(
    app: App,
    session_user: SessionUser,
    Path(id): Path<i64>,
    Json(data): Json<UpdatePost>,
) -> Result<Response, ApiError> {
    let request = services::posts::UpdatePost {
        id: PostId(id),
        title: data.title.as_deref(),
        text: data.text.as_deref(),
        pub_date: data.pub_date,
        category_id: data.category_id.map(|inner| inner.map(CategoryId)),
        location_id: data.location_id.map(|inner| inner.map(LocationId)),
        image: data.image.as_ref().map(Option::as_deref),
        tags: data.tags.as_deref(),
        is_published: data.is_published,
    };

    let view = request.perform(&app, &session_user).await?;
    Ok(Json(view.into_api_post_data()).into_response())
}

pub async fn delete_post(
    app: App,
    session_user: SessionUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let request = services::posts::DeletePost { id: PostId(id) };

    request.perform(&app, &session_user).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub fn routes() -> Router<App> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post).patch(update_post).delete(delete_post),
        )
}
