use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use quill_model::id::UserId;

use crate::auth::jwt::LoginClaims;
use crate::error::ApiError;
use crate::extract::SessionUser;
use crate::App;

#[doc(hidden)]
#[derive(FromRequestParts)]
pub struct Metadata {
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
}

/// Resolves the `Authorization: Bearer` header into a [`SessionUser`]
/// request extension. Requests without the header pass through untouched.
#[tracing::instrument(skip_all, name = "middleware.auth")]
pub async fn catch_token(
    metadata: Metadata,
    app: State<App>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(header) = metadata.auth_header {
        match process_user_token(&app, header.token()).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(error) => return error.into_response(),
        }
    }
    next.run(request).await
}

async fn process_user_token(app: &App, token: &str) -> Result<SessionUser, ApiError> {
    let claims = LoginClaims::decode(app, token)?;

    let mut conn = app.db_read().await?;
    SessionUser::from_db(&mut conn, UserId(claims.sub)).await
}
