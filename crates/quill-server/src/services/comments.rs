use chrono::Utc;
use std::collections::HashMap;

use quill_model::id::{CommentId, PostId};
use quill_model::post::PostView;
use quill_model::{Comment, User, Viewer};
use quill_postgres::queries::comments::CommentPgImpl;
use quill_postgres::queries::posts::PostViewPgImpl;
use quill_postgres::queries::users::UserPgImpl;

use crate::error::{ApiError, ApiErrorCategory};
use crate::extract::SessionUser;
use crate::App;

#[derive(Debug)]
pub struct ListComments {
    pub post_id: PostId,
}

impl ListComments {
    #[tracing::instrument(skip(app), name = "services.comments.list")]
    pub async fn perform(
        self,
        app: &App,
        viewer: &Viewer,
    ) -> Result<Vec<(Comment, User)>, ApiError> {
        let mut conn = app.db_read().await?;
        check_post_visible(&mut conn, self.post_id, viewer).await?;

        let comments = Comment::list_for_post(&mut conn, self.post_id).await?;

        let mut author_ids = comments
            .iter()
            .map(|comment| comment.author_id)
            .collect::<Vec<_>>();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors = User::find_many(&mut conn, &author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect::<HashMap<_, _>>();

        comments
            .into_iter()
            .map(|comment| match authors.get(&comment.author_id) {
                Some(author) => Ok((comment, author.clone())),
                None => {
                    tracing::error!(comment_id = ?comment.id, "comment author row is missing");
                    Err(ApiError::unknown())
                }
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct CreateComment<'a> {
    pub post_id: PostId,
    pub text: &'a str,
}

impl CreateComment<'_> {
    #[tracing::instrument(skip(app, session), name = "services.comments.create")]
    pub async fn perform(
        self,
        app: &App,
        session: &SessionUser,
    ) -> Result<(Comment, User), ApiError> {
        if self.text.trim().is_empty() {
            return Err(
                ApiError::new(ApiErrorCategory::InvalidRequest).message("Text must not be empty.")
            );
        }

        let mut conn = app.db_write().await?;
        check_post_visible(&mut conn, self.post_id, &session.viewer()).await?;

        let comment = Comment::create(&mut conn, self.post_id, session.id, self.text).await?;
        Ok((comment, session.user.clone()))
    }
}

#[derive(Debug)]
pub struct UpdateComment<'a> {
    pub id: CommentId,
    pub text: &'a str,
}

impl UpdateComment<'_> {
    #[tracing::instrument(skip(app, session), name = "services.comments.update")]
    pub async fn perform(
        self,
        app: &App,
        session: &SessionUser,
    ) -> Result<(Comment, User), ApiError> {
        if self.text.trim().is_empty() {
            return Err(
                ApiError::new(ApiErrorCategory::InvalidRequest).message("Text must not be empty.")
            );
        }

        let mut conn = app.db_write().await?;
        let Some(comment) = Comment::find(&mut conn, self.id).await? else {
            return Err(ApiError::new(ApiErrorCategory::NotFound));
        };

        // comments are editable by their author only, staff included
        if comment.author_id != session.id {
            return Err(ApiError::new(ApiErrorCategory::Forbidden));
        }

        let comment = Comment::update_text(&mut conn, comment.id, self.text).await?;
        Ok((comment, session.user.clone()))
    }
}

#[derive(Debug)]
pub struct DeleteComment {
    pub id: CommentId,
}

impl DeleteComment {
    #[tracing::instrument(skip(app, session), name = "services.comments.delete")]
    pub async fn perform(self, app: &App, session: &SessionUser) -> Result<(), ApiError> {
        let mut conn = app.db_write().await?;
        let Some(comment) = Comment::find(&mut conn, self.id).await? else {
            return Err(ApiError::new(ApiErrorCategory::NotFound));
        };

        if comment.author_id != session.id && !session.is_staff {
            return Err(ApiError::new(ApiErrorCategory::Forbidden));
        }

        Comment::delete(&mut conn, comment.id).await?;
        Ok(())
    }
}

/// Comments follow the visibility of their post. A post the viewer
/// may not see has, as far as they are concerned, no comments either.
async fn check_post_visible(
    conn: &mut diesel_async::AsyncPgConnection,
    post_id: PostId,
    viewer: &Viewer,
) -> Result<(), ApiError> {
    let view = PostView::find(conn, post_id).await?;

    let now = Utc::now().naive_utc();
    match view {
        Some(view) if view.visible_to(now, viewer) => Ok(()),
        _ => Err(ApiError::new(ApiErrorCategory::NotFound)),
    }
}
