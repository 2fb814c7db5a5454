use chrono::{NaiveDate, Utc};
use tokio::task::spawn_blocking;

use quill_api_types::error::RegisterUserFailed;
use quill_api_types::Sensitive;
use quill_model::user::{InsertUser, User};
use quill_model::validation;
use quill_postgres::queries::users::{InsertUserPgImpl, UserPgImpl};

use crate::auth::password;
use crate::error::{ApiError, ApiErrorCategory};
use crate::App;

#[derive(Debug)]
pub struct Register<'a> {
    pub email: Sensitive<&'a str>,
    pub password: Sensitive<String>,
    pub first_name: &'a str,
    pub last_name: Option<&'a str>,
    pub birthday: NaiveDate,
}

#[derive(Debug)]
pub struct RegisterResult {
    pub user: User,
}

impl Register<'_> {
    #[tracing::instrument(skip(app), name = "services.users.register")]
    pub async fn perform(self, app: &App) -> Result<RegisterResult, ApiError> {
        if !validation::is_valid_email(&self.email) {
            return Err(ApiError::new(ApiErrorCategory::InvalidRequest)
                .message("Invalid email address."));
        }

        if self.first_name.trim().is_empty() {
            return Err(ApiError::new(ApiErrorCategory::InvalidRequest)
                .message("First name must not be empty."));
        }

        if !validation::is_valid_password(&self.password) {
            return Err(ApiError::new(ApiErrorCategory::RegisterUserFailed(
                RegisterUserFailed::WeakPassword,
            )));
        }

        let today = Utc::now().date_naive();
        if validation::validate_birthday(self.birthday, today).is_err() {
            return Err(ApiError::new(ApiErrorCategory::RegisterUserFailed(
                RegisterUserFailed::InvalidBirthday,
            )));
        }

        let mut conn = app.db_write().await?;
        if User::check_email_taken(&mut conn, &self.email).await? {
            return Err(ApiError::new(ApiErrorCategory::RegisterUserFailed(
                RegisterUserFailed::EmailTaken,
            )));
        }

        let raw_password = self.password.into_inner();
        let password_hash = spawn_blocking(move || password::hash(raw_password)).await??;

        let user = InsertUser::builder()
            .email(&self.email)
            .first_name(self.first_name)
            .maybe_last_name(self.last_name)
            .birthday(self.birthday)
            .password_hash(&password_hash)
            .build()
            .create(&mut conn)
            .await?;

        Ok(RegisterResult { user })
    }
}
