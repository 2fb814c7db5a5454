use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{ApiError, ApiErrorCategory};
use crate::App;

static JWT_HEADER: LazyLock<Header> = LazyLock::new(|| Header::new(Algorithm::HS256));
static JWT_LOGIN_ISSUER: &str = "quill.api.login";

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginClaims {
    pub nbf: i64,
    pub exp: i64,
    pub iss: String,
    pub sub: i64,
}

impl LoginClaims {
    pub fn generate(app: &App, user: &quill_model::User) -> Self {
        let now = Utc::now();
        let expiry = TimeDelta::seconds(app.config.auth.token_expiry_secs);

        Self {
            nbf: now.timestamp(),
            exp: (now + expiry).timestamp(),
            iss: JWT_LOGIN_ISSUER.to_string(),
            sub: user.id.0,
        }
    }

    pub fn encode(&self, app: &App) -> Result<String, ApiError> {
        jsonwebtoken::encode(&JWT_HEADER, self, &app.jwt_encode_key).map_err(|error| {
            tracing::error!(%error, "could not encode login jwt claims");
            ApiError::unknown()
        })
    }

    pub fn decode(app: &App, token: &str) -> Result<Self, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[JWT_LOGIN_ISSUER]);

        let token = token.replace(char::is_whitespace, "");
        match jsonwebtoken::decode(&token, &app.jwt_decode_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(error) => match error.kind() {
                ErrorKind::ExpiredSignature => {
                    Err(ApiError::new(ApiErrorCategory::AccessDenied)
                        .message("Login token has expired."))
                }
                _ => Err(ApiError::new(ApiErrorCategory::AccessDenied)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use quill_model::id::UserId;
    use quill_model::User;

    fn make_user() -> User {
        User {
            id: UserId(17),
            created: Utc::now().naive_utc(),
            updated: None,
            email: "alice@example.com".into(),
            first_name: "Alice".into(),
            last_name: None,
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            avatar: None,
            password_hash: String::new(),
            is_staff: false,
        }
    }

    #[tokio::test]
    async fn round_trips_through_encode_and_decode() {
        let app = App::for_tests();
        let claims = LoginClaims::generate(&app, &make_user());

        let token = claims.encode(&app).unwrap();
        let decoded = LoginClaims::decode(&app, &token).unwrap();

        assert_eq!(decoded.sub, 17);
        assert_eq!(decoded.iss, JWT_LOGIN_ISSUER);
    }

    #[tokio::test]
    async fn rejects_tampered_tokens() {
        let app = App::for_tests();
        let claims = LoginClaims::generate(&app, &make_user());

        let mut token = claims.encode(&app).unwrap();
        // flip a character somewhere in the signature
        let tampered = if token.pop() == Some('a') { 'b' } else { 'a' };
        token.push(tampered);

        assert!(LoginClaims::decode(&app, &token).is_err());
    }
}
