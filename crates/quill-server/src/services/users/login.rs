use tokio::task::spawn_blocking;

use quill_api_types::error::LoginUserFailed;
use quill_api_types::Sensitive;
use quill_model::User;
use quill_postgres::queries::users::UserPgImpl;

use crate::auth::jwt::LoginClaims;
use crate::auth::password;
use crate::error::{ApiError, ApiErrorCategory};
use crate::App;

/// A well-formed argon2id hash no password can match. Unknown emails
/// verify against this one so both failure paths cost a hash
/// computation.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

#[derive(Debug)]
pub struct Login<'a> {
    pub email: Sensitive<&'a str>,
    pub password: Sensitive<String>,
}

#[derive(Debug)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

impl Login<'_> {
    /// Unknown emails and wrong passwords fail identically, in body
    /// and in timing, so the login form cannot be used to probe which
    /// emails are registered.
    #[tracing::instrument(skip(app), name = "services.users.login")]
    pub async fn perform(self, app: &App) -> Result<LoginResult, ApiError> {
        let invalid_credentials = || {
            ApiError::new(ApiErrorCategory::LoginUserFailed(
                LoginUserFailed::InvalidCredentials,
            ))
        };

        let mut conn = app.db_read().await?;
        let user = User::find_by_email(&mut conn, &self.email).await?;

        let raw_password = self.password.into_inner();
        let password_hash = user.as_ref().map_or_else(
            || DUMMY_PASSWORD_HASH.to_string(),
            |user| user.password_hash.clone(),
        );

        let matches =
            spawn_blocking(move || password::verify(raw_password.as_bytes(), &password_hash))
                .await??;

        let Some(user) = user else {
            return Err(invalid_credentials());
        };

        if !matches {
            return Err(invalid_credentials());
        }

        let token = LoginClaims::generate(app, &user).encode(app)?;
        Ok(LoginResult { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The dummy hash has to parse; a malformed one would surface as
    // an internal error instead of invalid credentials.
    #[test]
    fn dummy_hash_parses_and_matches_nothing() {
        assert!(!password::verify(b"hunter2", DUMMY_PASSWORD_HASH).unwrap());
        assert!(!password::verify(b"", DUMMY_PASSWORD_HASH).unwrap());
    }
}
