use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;

use quill_api_types::routes::users::{
    ChangePassword, LoginUser, LoginUserResponse, ProfileResponse, RegisterUser,
    RegisterUserResponse, UpdateProfile,
};
use quill_api_types::routes::Pagination;
use quill_api_types::Sensitive;
use quill_model::id::UserId;

use super::morphers::{IntoApiPostData, IntoApiUserProfile, IntoApiUserSummary};
use crate::error::ApiError;
use crate::extract::{Json, MaybeSessionUser, SessionUser};
use crate::services;
use crate::services::util::PageWindow;
use crate::App;

pub async fn register(app: App, Json(data): Json<RegisterUser>) -> Result<Response, ApiError> {
    let request = services::users::Register {
        email: Sensitive::new(data.email.as_str()),
        password: data.password.clone(),
        first_name: &data.first_name,
        last_name: data.last_name.as_deref(),
        birthday: data.birthday,
    };

    let result = request.perform(&app).await?;
    let response = RegisterUserResponse {
        id: result.user.id.0,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

pub async fn login(app: App, Json(data): Json<LoginUser>) -> Result<Response, ApiError> {
    let request = services::users::Login {
        email: Sensitive::new(data.email.as_str()),
        password: data.password.clone(),
    };

    let result = request.perform(&app).await?;
    let response = LoginUserResponse {
        user: result.user.into_api_user_profile(),
        token: result.token,
    };

    Ok(Json(response).into_response())
}

pub async fn profile(
    app: App,
    session_user: MaybeSessionUser,
    Path(id): Path<i64>,
    Query(pagination): Query<Pagination>,
) -> Result<Response, ApiError> {
    let request = services::users::GetProfile {
        id: UserId(id),
        window: PageWindow::new(&pagination),
    };

    let result = request.perform(&app, &session_user.viewer()).await?;
    let response = ProfileResponse {
        user: result.user.into_api_user_summary(),
        posts: result
            .posts
            .into_iter()
            .map(IntoApiPostData::into_api_post_data)
            .collect(),
    };

    Ok(Json(response).into_response())
}

pub async fn local_profile(session_user: SessionUser) -> Result<Response, ApiError> {
    let profile = session_user.into_inner().into_api_user_profile();
    Ok(Json(profile).into_response())
}

pub async fn update_profile(
    app: App,
    session_user: SessionUser,
    Json(data): Json<UpdateProfile>,
) -> Result<Response, ApiError> {
    let request = services::users::UpdateProfile {
        first_name: data.first_name.as_deref(),
        last_name: data.last_name.as_ref().map(Option::as_deref),
        birthday: data.birthday,
        avatar: data.avatar.as_ref().map(Option::as_deref),
    };

    let user = request.perform(&app, &session_user).await?;
    Ok(Json(user.into_api_user_profile()).into_response())
}

pub async fn change_password(
    app: App,
    session_user: SessionUser,
    Json(data): Json<ChangePassword>,
) -> Result<Response, ApiError> {
    let request = services::users::ChangePassword {
        old_password: data.old_password,
        new_password: data.new_password,
    };

    request.perform(&app, &session_user).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub fn routes() -> Router<App> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/@me", get(local_profile).patch(update_profile))
        .route("/users/@me/password", put(change_password))
        .route("/users/:id", get(profile))
}
