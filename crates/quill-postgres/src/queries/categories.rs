use diesel::prelude::*;
use diesel::QueryResult;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use quill_model::id::CategoryId;
use quill_model::schema::categories;
use quill_model::Category;

pub trait CategoryPgImpl: Sized {
    async fn find(conn: &mut AsyncPgConnection, id: CategoryId)
        -> QueryResult<Option<Self>>;

    async fn find_by_slug(
        conn: &mut AsyncPgConnection,
        slug: &str,
    ) -> QueryResult<Option<Self>>;

    /// Lists published categories for the category index.
    async fn list_published(conn: &mut AsyncPgConnection) -> QueryResult<Vec<Self>>;
}

impl CategoryPgImpl for Category {
    #[tracing::instrument(skip_all, name = "db.query.categories.find")]
    async fn find(
        conn: &mut AsyncPgConnection,
        id: CategoryId,
    ) -> QueryResult<Option<Self>> {
        categories::table
            .find(id)
            .select(Category::as_select())
            .get_result(conn)
            .await
            .optional()
    }

    #[tracing::instrument(skip_all, name = "db.query.categories.find_by_slug")]
    async fn find_by_slug(
        conn: &mut AsyncPgConnection,
        slug: &str,
    ) -> QueryResult<Option<Self>> {
        categories::table
            .filter(categories::slug.eq(slug))
            .select(Category::as_select())
            .get_result(conn)
            .await
            .optional()
    }

    #[tracing::instrument(skip_all, name = "db.query.categories.list_published")]
    async fn list_published(conn: &mut AsyncPgConnection) -> QueryResult<Vec<Self>> {
        categories::table
            .filter(categories::is_published.eq(true))
            .select(Category::as_select())
            .order(categories::title.asc())
            .load(conn)
            .await
    }
}
