use chrono::Utc;

use quill_model::post::PostView;
use quill_model::{Category, Viewer};
use quill_postgres::queries::categories::CategoryPgImpl;
use quill_postgres::queries::posts::PostViewPgImpl;

use crate::error::{ApiError, ApiErrorCategory};
use crate::services::util::PageWindow;
use crate::App;

#[derive(Debug)]
pub struct ListCategories;

impl ListCategories {
    #[tracing::instrument(skip(app), name = "services.categories.list")]
    pub async fn perform(self, app: &App) -> Result<Vec<Category>, ApiError> {
        let mut conn = app.db_read().await?;
        Ok(Category::list_published(&mut conn).await?)
    }
}

#[derive(Debug)]
pub struct ListCategoryPosts<'a> {
    pub slug: &'a str,
    pub window: PageWindow,
}

impl ListCategoryPosts<'_> {
    /// Unpublished categories 404 for everyone, their posts' authors
    /// included. The author bypass applies to posts, not categories.
    #[tracing::instrument(skip(app), name = "services.categories.list_posts")]
    pub async fn perform(
        self,
        app: &App,
        viewer: &Viewer,
    ) -> Result<(Category, Vec<PostView>), ApiError> {
        let mut conn = app.db_read().await?;

        let category = Category::find_by_slug(&mut conn, self.slug).await?;
        let Some(category) = category.filter(|category| category.is_published) else {
            return Err(ApiError::new(ApiErrorCategory::NotFound));
        };

        let now = Utc::now().naive_utc();
        let posts = PostView::list_by_category(
            &mut conn,
            category.id,
            viewer,
            now,
            self.window.limit,
            self.window.offset,
        )
        .await?;

        Ok((category, posts))
    }
}
