use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use diesel_async::AsyncPgConnection;
use std::ops::Deref;

use quill_model::id::UserId;
use quill_model::{User, Viewer};
use quill_postgres::queries::users::UserPgImpl;

use crate::error::{ApiError, ApiErrorCategory};
use crate::App;

/// The authenticated user of the current request, stashed into the
/// request extensions by the auth middleware.
#[derive(Clone)]
pub struct SessionUser {
    pub user: User,
}

impl SessionUser {
    #[must_use]
    pub fn into_inner(self) -> User {
        self.user
    }

    #[must_use]
    pub fn viewer(&self) -> Viewer {
        Viewer::User(self.user.id)
    }

    pub(crate) async fn from_db(
        conn: &mut AsyncPgConnection,
        id: UserId,
    ) -> Result<Self, ApiError> {
        let user = User::find(conn, id).await?;
        if let Some(user) = user {
            Ok(Self { user })
        } else {
            // valid token for a user that no longer exists
            Err(ApiError::new(ApiErrorCategory::AccessDenied))
        }
    }
}

impl Deref for SessionUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

impl std::fmt::Debug for SessionUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // for diagnostic purposes
        f.debug_struct("SessionUser")
            .field("id", &self.user.id)
            .finish_non_exhaustive()
    }
}

#[axum::async_trait]
impl FromRequestParts<App> for SessionUser {
    type Rejection = Response;

    #[tracing::instrument(skip_all, name = "extractors.session_user")]
    async fn from_request_parts(parts: &mut Parts, _app: &App) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<SessionUser>() {
            Some(identity) => Ok(identity.clone()),
            None => Err(ApiError::new(ApiErrorCategory::AccessDenied).into_response()),
        }
    }
}

/// Optional flavor of [`SessionUser`] for routes that are public but
/// render differently for signed-in users.
#[derive(Debug, Clone)]
pub struct MaybeSessionUser(pub Option<SessionUser>);

impl MaybeSessionUser {
    #[must_use]
    pub fn viewer(&self) -> Viewer {
        match &self.0 {
            Some(session) => session.viewer(),
            None => Viewer::Anonymous,
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<App> for MaybeSessionUser {
    type Rejection = Response;

    #[tracing::instrument(skip_all, name = "extractors.maybe_session_user")]
    async fn from_request_parts(parts: &mut Parts, _app: &App) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<SessionUser>().cloned()))
    }
}
