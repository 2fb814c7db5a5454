use chrono::{NaiveDate, Utc};
use tokio::task::spawn_blocking;

use quill_api_types::Sensitive;
use quill_model::id::UserId;
use quill_model::post::PostView;
use quill_model::user::{UpdateUser, User};
use quill_model::{validation, Viewer};
use quill_postgres::queries::posts::PostViewPgImpl;
use quill_postgres::queries::users::UserPgImpl;

use crate::auth::password;
use crate::error::{ApiError, ApiErrorCategory};
use crate::extract::SessionUser;
use crate::services::util::PageWindow;
use crate::App;

#[derive(Debug)]
pub struct GetProfile {
    pub id: UserId,
    pub window: PageWindow,
}

#[derive(Debug)]
pub struct ProfileResult {
    pub user: User,
    pub posts: Vec<PostView>,
}

impl GetProfile {
    /// A profile page is the owner's feed: when the session user views
    /// their own profile, every post of theirs shows up, drafts and
    /// scheduled posts included.
    #[tracing::instrument(skip(app), name = "services.users.profile")]
    pub async fn perform(self, app: &App, viewer: &Viewer) -> Result<ProfileResult, ApiError> {
        let mut conn = app.db_read().await?;
        let Some(user) = User::find(&mut conn, self.id).await? else {
            return Err(ApiError::new(ApiErrorCategory::NotFound));
        };

        let now = Utc::now().naive_utc();
        let posts = PostView::list_by_author(
            &mut conn,
            user.id,
            viewer,
            now,
            self.window.limit,
            self.window.offset,
        )
        .await?;

        Ok(ProfileResult { user, posts })
    }
}

#[derive(Debug)]
pub struct UpdateProfile<'a> {
    pub first_name: Option<&'a str>,
    /// `Some(None)` clears the last name.
    pub last_name: Option<Option<&'a str>>,
    pub birthday: Option<NaiveDate>,
    pub avatar: Option<Option<&'a str>>,
}

impl UpdateProfile<'_> {
    #[tracing::instrument(skip(app, session), name = "services.users.update_profile")]
    pub async fn perform(self, app: &App, session: &SessionUser) -> Result<User, ApiError> {
        if matches!(self.first_name, Some(first_name) if first_name.trim().is_empty()) {
            return Err(ApiError::new(ApiErrorCategory::InvalidRequest)
                .message("First name must not be empty."));
        }

        if let Some(birthday) = self.birthday {
            let today = Utc::now().date_naive();
            if validation::validate_birthday(birthday, today).is_err() {
                return Err(ApiError::new(ApiErrorCategory::InvalidRequest)
                    .message("Expected an age between 1 and 120 years."));
            }
        }

        let has_changes = self.first_name.is_some()
            || self.last_name.is_some()
            || self.birthday.is_some()
            || self.avatar.is_some();
        if !has_changes {
            return Ok(session.user.clone());
        }

        let changeset = UpdateUser {
            first_name: self.first_name,
            last_name: self.last_name,
            birthday: self.birthday,
            avatar: self.avatar,
            password_hash: None,
        };

        let mut conn = app.db_write().await?;
        let user = User::update(&mut conn, session.id, &changeset).await?;
        Ok(user)
    }
}

#[derive(Debug)]
pub struct ChangePassword {
    pub old_password: Sensitive<String>,
    pub new_password: Sensitive<String>,
}

impl ChangePassword {
    #[tracing::instrument(skip(app, session), name = "services.users.change_password")]
    pub async fn perform(self, app: &App, session: &SessionUser) -> Result<(), ApiError> {
        if !validation::is_valid_password(&self.new_password) {
            return Err(ApiError::new(ApiErrorCategory::InvalidRequest)
                .message("New password must be at least 8 characters long."));
        }

        let old_password = self.old_password.into_inner();
        let password_hash = session.password_hash.clone();
        let matches =
            spawn_blocking(move || password::verify(old_password.as_bytes(), &password_hash))
                .await??;

        if !matches {
            return Err(ApiError::new(ApiErrorCategory::InvalidRequest)
                .message("Old password is incorrect."));
        }

        let new_password = self.new_password.into_inner();
        let new_hash = spawn_blocking(move || password::hash(new_password)).await??;

        let changeset = UpdateUser::builder().password_hash(new_hash.as_str()).build();

        let mut conn = app.db_write().await?;
        User::update(&mut conn, session.id, &changeset).await?;
        Ok(())
    }
}
