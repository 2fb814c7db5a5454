use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::Router;

use quill_api_types::routes::comments::{CreateComment, UpdateComment};
use quill_model::id::{CommentId, PostId};

use super::morphers::IntoApiCommentData;
use crate::error::ApiError;
use crate::extract::{Json, MaybeSessionUser, SessionUser};
use crate::services;
use crate::App;

pub async fn list_comments(
    app: App,
    session_user: MaybeSessionUser,
    Path(post_id): Path<i64>,
) -> Result<Response, ApiError> {
    let request = services::comments::ListComments {
        post_id: PostId(post_id),
    };

    let response = request
        .perform(&app, &session_user.viewer())
        .await?
        .into_iter()
        .map(IntoApiCommentData::into_api_comment_data)
        .collect::<Vec<_>>();

    Ok(Json(response).into_response())
}

pub async fn create_comment(
    app: App,
    session_user: SessionUser,
    Path(post_id): Path<i64>,
    Json(data): Json<CreateComment>,
) -> Result<Response, ApiError> {
    let request = services::comments::CreateComment {
        post_id: PostId(post_id),
        text: &data.text,
    };

    let comment = request.perform(&app, &session_user).await?;
    Ok((StatusCode::CREATED, Json(comment.into_api_comment_data())).into_response())
}

pub async fn update_comment(
    app: App,
    session_user: SessionUser,
    Path(id): Path<i64>,
    Json(data): Json<UpdateComment>,
) -> Result<Response, ApiError> {
    let request = services::comments::UpdateComment {
        id: CommentId(id),
        text: &data.text,
    };

    let comment = request.perform(&app, &session_user).await?;
    Ok(Json(comment.into_api_comment_data()).into_response())
}

pub async fn delete_comment(
    app: App,
    session_user: SessionUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let request = services::comments::DeleteComment { id: CommentId(id) };

    request.perform(&app, &session_user).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub fn routes() -> Router<App> {
    Router::new()
        .route(
            "/posts/:id/comments",
            get(list_comments).post(create_comment),
        )
        .route("/comments/:id", patch(update_comment).delete(delete_comment))
}
