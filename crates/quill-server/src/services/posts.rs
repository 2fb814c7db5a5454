use chrono::{NaiveDateTime, Utc};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::AsyncConnection;

use quill_model::id::{CategoryId, LocationId, PostId};
use quill_model::post::{InsertPost, Post, PostView};
use quill_model::{Category, Location, Viewer};
use quill_postgres::queries::categories::CategoryPgImpl;
use quill_postgres::queries::locations::LocationPgImpl;
use quill_postgres::queries::posts::{InsertPostPgImpl, PostPgImpl, PostViewPgImpl};
use quill_postgres::queries::tags;

use crate::error::{ApiError, ApiErrorCategory};
use crate::extract::SessionUser;
use crate::services::util::PageWindow;
use crate::App;

#[derive(Debug)]
pub struct GetPost {
    pub id: PostId,
}

impl GetPost {
    #[tracing::instrument(skip(app), name = "services.posts.get")]
    pub async fn perform(self, app: &App, viewer: &Viewer) -> Result<PostView, ApiError> {
        let mut conn = app.db_read().await?;
        let view = PostView::find(&mut conn, self.id).await?;

        let now = Utc::now().naive_utc();
        match view {
            Some(view) if view.visible_to(now, viewer) => Ok(view),
            // hidden posts are indistinguishable from missing ones
            _ => Err(ApiError::new(ApiErrorCategory::NotFound)),
        }
    }
}

#[derive(Debug)]
pub struct ListPosts {
    pub window: PageWindow,
}

impl ListPosts {
    #[tracing::instrument(skip(app), name = "services.posts.list")]
    pub async fn perform(self, app: &App, viewer: &Viewer) -> Result<Vec<PostView>, ApiError> {
        let mut conn = app.db_read().await?;
        let now = Utc::now().naive_utc();

        let views = PostView::list(
            &mut conn,
            viewer,
            now,
            self.window.limit,
            self.window.offset,
        )
        .await?;

        Ok(views)
    }
}

#[derive(Debug)]
pub struct CreatePost<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub pub_date: Option<NaiveDateTime>,
    pub category_id: Option<CategoryId>,
    pub location_id: Option<LocationId>,
    pub image: Option<&'a str>,
    pub tags: &'a [String],
    pub is_published: Option<bool>,
}

impl CreatePost<'_> {
    #[tracing::instrument(skip(app, session), name = "services.posts.create")]
    pub async fn perform(self, app: &App, session: &SessionUser) -> Result<PostView, ApiError> {
        if self.title.trim().is_empty() {
            return Err(
                ApiError::new(ApiErrorCategory::InvalidRequest).message("Title must not be empty.")
            );
        }

        if self.text.trim().is_empty() {
            return Err(
                ApiError::new(ApiErrorCategory::InvalidRequest).message("Text must not be empty.")
            );
        }

        let mut conn = app.db_write().await?;
        check_category_exists(&mut conn, self.category_id).await?;
        check_location_exists(&mut conn, self.location_id).await?;

        let insert = InsertPost::builder()
            .author_id(session.id)
            .title(self.title)
            .text(self.text)
            .pub_date(self.pub_date.unwrap_or_else(|| Utc::now().naive_utc()))
            .maybe_category_id(self.category_id)
            .maybe_location_id(self.location_id)
            .maybe_image(self.image)
            .is_published(self.is_published.unwrap_or(true))
            .build();

        let tags = normalize_tags(self.tags);
        let post = conn
            .transaction(|conn| {
                async move {
                    let post = insert.create(conn).await?;
                    if !tags.is_empty() {
                        tags::replace_for_post(conn, post.id, &tags).await?;
                    }
                    Ok::<_, ApiError>(post)
                }
                .scope_boxed()
            })
            .await?;

        let Some(view) = PostView::find(&mut conn, post.id).await? else {
            return Err(ApiError::unknown());
        };
        Ok(view)
    }
}

#[derive(Debug)]
pub struct UpdatePost<'a> {
    pub id: PostId,
    pub title: Option<&'a str>,
    pub text: Option<&'a str>,
    pub pub_date: Option<NaiveDateTime>,
    /// `Some(None)` clears the category.
    pub category_id: Option<Option<CategoryId>>,
    pub location_id: Option<Option<LocationId>>,
    pub image: Option<Option<&'a str>>,
    pub tags: Option<&'a [String]>,
    pub is_published: Option<bool>,
}

impl UpdatePost<'_> {
    #[tracing::instrument(skip(app, session), name = "services.posts.update")]
    pub async fn perform(self, app: &App, session: &SessionUser) -> Result<PostView, ApiError> {
        if matches!(self.title, Some(title) if title.trim().is_empty()) {
            return Err(
                ApiError::new(ApiErrorCategory::InvalidRequest).message("Title must not be empty.")
            );
        }

        if matches!(self.text, Some(text) if text.trim().is_empty()) {
            return Err(
                ApiError::new(ApiErrorCategory::InvalidRequest).message("Text must not be empty.")
            );
        }

        let mut conn = app.db_write().await?;
        let Some(post) = Post::find(&mut conn, self.id).await? else {
            return Err(ApiError::new(ApiErrorCategory::NotFound));
        };

        if post.author_id != session.id && !session.is_staff {
            return Err(ApiError::new(ApiErrorCategory::Forbidden));
        }

        if let Some(Some(category_id)) = self.category_id {
            check_category_exists(&mut conn, Some(category_id)).await?;
        }
        if let Some(Some(location_id)) = self.location_id {
            check_location_exists(&mut conn, Some(location_id)).await?;
        }

        let has_field_changes = self.title.is_some()
            || self.text.is_some()
            || self.pub_date.is_some()
            || self.category_id.is_some()
            || self.location_id.is_some()
            || self.image.is_some()
            || self.is_published.is_some();

        let changeset = quill_model::post::UpdatePost {
            title: self.title,
            text: self.text,
            pub_date: self.pub_date,
            category_id: self.category_id,
            location_id: self.location_id,
            image: self.image,
            is_published: self.is_published,
        };

        let tags = self.tags.map(normalize_tags);
        if has_field_changes || tags.is_some() {
            let post_id = post.id;
            conn.transaction(|conn| {
                async move {
                    if has_field_changes {
                        Post::update(conn, post_id, &changeset).await?;
                    }
                    if let Some(tags) = tags {
                        tags::replace_for_post(conn, post_id, &tags).await?;
                    }
                    Ok::<_, ApiError>(())
                }
                .scope_boxed()
            })
            .await?;
        }

        let Some(view) = PostView::find(&mut conn, post.id).await? else {
            return Err(ApiError::unknown());
        };
        Ok(view)
    }
}

#[derive(Debug)]
pub struct DeletePost {
    pub id: PostId,
}

impl DeletePost {
    #[tracing::instrument(skip(app, session), name = "services.posts.delete")]
    pub async fn perform(self, app: &App, session: &SessionUser) -> Result<(), ApiError> {
        let mut conn = app.db_write().await?;
        let Some(post) = Post::find(&mut conn, self.id).await? else {
            return Err(ApiError::new(ApiErrorCategory::NotFound));
        };

        if post.author_id != session.id && !session.is_staff {
            return Err(ApiError::new(ApiErrorCategory::Forbidden));
        }

        Post::delete(&mut conn, post.id).await?;
        Ok(())
    }
}

async fn check_category_exists(
    conn: &mut diesel_async::AsyncPgConnection,
    id: Option<CategoryId>,
) -> Result<(), ApiError> {
    let Some(id) = id else { return Ok(()) };
    if Category::find(conn, id).await?.is_none() {
        return Err(ApiError::new(ApiErrorCategory::InvalidRequest).message("Unknown category."));
    }
    Ok(())
}

async fn check_location_exists(
    conn: &mut diesel_async::AsyncPgConnection,
    id: Option<LocationId>,
) -> Result<(), ApiError> {
    let Some(id) = id else { return Ok(()) };
    if Location::find(conn, id).await?.is_none() {
        return Err(ApiError::new(ApiErrorCategory::InvalidRequest).message("Unknown location."));
    }
    Ok(())
}

fn normalize_tags(input: &[String]) -> Vec<String> {
    let mut tags = Vec::<String>::new();
    for tag in input {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|seen| seen == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let input = [
            "  travel ".to_string(),
            "travel".to_string(),
            String::new(),
            "food".to_string(),
        ];
        assert_eq!(normalize_tags(&input), vec!["travel", "food"]);
    }
}
