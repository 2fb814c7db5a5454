use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::QueryResult;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use quill_model::id::{CategoryId, PostId, UserId};
use quill_model::post::{InsertPost, Post, PostView, UpdatePost};
use quill_model::schema::{categories, locations, posts, users};
use quill_model::{Category, Location, Tag, User, Viewer};

use super::tags;

/// The SQL form of the post visibility rule. Every list query goes
/// through this one expression so list views and the in-memory
/// predicate cannot drift apart.
///
/// Meant for query sources where `posts` is left-joined with
/// `categories`.
macro_rules! publicly_visible {
    ($now:expr) => {
        posts::is_published
            .eq(true)
            .and(posts::pub_date.le($now))
            .and(
                posts::category_id
                    .is_null()
                    .or(categories::is_published.eq(true)),
            )
    };
}

/// Builds the joined select every post list view runs, newest publish
/// time first, with zero or more filters applied.
macro_rules! view_query {
    ($limit:expr, $offset:expr $(, $filter:expr)* $(,)?) => {
        posts::table
            .inner_join(users::table)
            .left_join(categories::table)
            .left_join(locations::table)
            $(.filter($filter))*
            .select((
                Post::as_select(),
                User::as_select(),
                categories::all_columns.nullable(),
                locations::all_columns.nullable(),
            ))
            .order(posts::pub_date.desc())
            .limit($limit)
            .offset($offset)
    };
}

type PostRow = (Post, User, Option<Category>, Option<Location>);

pub trait PostPgImpl {
    async fn find(conn: &mut AsyncPgConnection, id: PostId) -> QueryResult<Option<Post>>;

    async fn update(
        conn: &mut AsyncPgConnection,
        id: PostId,
        form: &UpdatePost<'_>,
    ) -> QueryResult<Post>;

    async fn delete(conn: &mut AsyncPgConnection, id: PostId) -> QueryResult<usize>;
}

impl PostPgImpl for Post {
    #[tracing::instrument(skip_all, name = "db.query.posts.find")]
    async fn find(conn: &mut AsyncPgConnection, id: PostId) -> QueryResult<Option<Post>> {
        posts::table
            .find(id)
            .select(Post::as_select())
            .get_result(conn)
            .await
            .optional()
    }

    #[tracing::instrument(skip_all, name = "db.query.posts.update")]
    async fn update(
        conn: &mut AsyncPgConnection,
        id: PostId,
        form: &UpdatePost<'_>,
    ) -> QueryResult<Post> {
        diesel::update(posts::table.find(id))
            .set(form)
            .returning(Post::as_returning())
            .get_result(conn)
            .await
    }

    #[tracing::instrument(skip_all, name = "db.query.posts.delete")]
    async fn delete(conn: &mut AsyncPgConnection, id: PostId) -> QueryResult<usize> {
        diesel::delete(posts::table.find(id)).execute(conn).await
    }
}

pub trait InsertPostPgImpl {
    async fn create(&self, conn: &mut AsyncPgConnection) -> QueryResult<Post>;
}

impl InsertPostPgImpl for InsertPost<'_> {
    #[tracing::instrument(skip_all, name = "db.query.posts.insert")]
    async fn create(&self, conn: &mut AsyncPgConnection) -> QueryResult<Post> {
        diesel::insert_into(posts::table)
            .values((
                posts::author_id.eq(self.author_id),
                posts::title.eq(self.title),
                posts::text.eq(self.text),
                posts::pub_date.eq(self.pub_date),
                posts::category_id.eq(self.category_id),
                posts::location_id.eq(self.location_id),
                posts::image.eq(self.image),
                posts::is_published.eq(self.is_published),
            ))
            .returning(Post::as_returning())
            .get_result(conn)
            .await
    }
}

pub trait PostViewPgImpl: Sized {
    async fn find(conn: &mut AsyncPgConnection, id: PostId) -> QueryResult<Option<Self>>;

    /// Lists posts visible to `viewer` at `now`.
    async fn list(
        conn: &mut AsyncPgConnection,
        viewer: &Viewer,
        now: NaiveDateTime,
        limit: i64,
        offset: i64,
    ) -> QueryResult<Vec<Self>>;

    /// Lists posts of one category, filtered for `viewer`. Whether
    /// the category itself is published is the caller's concern.
    async fn list_by_category(
        conn: &mut AsyncPgConnection,
        category_id: CategoryId,
        viewer: &Viewer,
        now: NaiveDateTime,
        limit: i64,
        offset: i64,
    ) -> QueryResult<Vec<Self>>;

    /// Lists one author's posts. The visibility filter is omitted
    /// entirely when the author views their own feed.
    async fn list_by_author(
        conn: &mut AsyncPgConnection,
        author_id: UserId,
        viewer: &Viewer,
        now: NaiveDateTime,
        limit: i64,
        offset: i64,
    ) -> QueryResult<Vec<Self>>;
}

impl PostViewPgImpl for PostView {
    #[tracing::instrument(skip_all, name = "db.query.posts.find_view")]
    async fn find(conn: &mut AsyncPgConnection, id: PostId) -> QueryResult<Option<Self>> {
        let row: Option<PostRow> = posts::table
            .inner_join(users::table)
            .left_join(categories::table)
            .left_join(locations::table)
            .filter(posts::id.eq(id))
            .select((
                Post::as_select(),
                User::as_select(),
                categories::all_columns.nullable(),
                locations::all_columns.nullable(),
            ))
            .get_result(conn)
            .await
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let tags = tags::for_post(conn, id).await?;
        Ok(Some(into_view(row, tags)))
    }

    #[tracing::instrument(skip_all, name = "db.query.posts.list")]
    async fn list(
        conn: &mut AsyncPgConnection,
        viewer: &Viewer,
        now: NaiveDateTime,
        limit: i64,
        offset: i64,
    ) -> QueryResult<Vec<Self>> {
        let rows: Vec<PostRow> = match viewer.user_id() {
            Some(user_id) => {
                view_query!(
                    limit,
                    offset,
                    publicly_visible!(now).or(posts::author_id.eq(user_id)),
                )
                .load(conn)
                .await?
            }
            None => {
                view_query!(limit, offset, publicly_visible!(now))
                    .load(conn)
                    .await?
            }
        };

        attach_tags(conn, rows).await
    }

    #[tracing::instrument(skip_all, name = "db.query.posts.list_by_category")]
    async fn list_by_category(
        conn: &mut AsyncPgConnection,
        category_id: CategoryId,
        viewer: &Viewer,
        now: NaiveDateTime,
        limit: i64,
        offset: i64,
    ) -> QueryResult<Vec<Self>> {
        let rows: Vec<PostRow> = match viewer.user_id() {
            Some(user_id) => {
                view_query!(
                    limit,
                    offset,
                    posts::category_id.eq(category_id),
                    publicly_visible!(now).or(posts::author_id.eq(user_id)),
                )
                .load(conn)
                .await?
            }
            None => {
                view_query!(
                    limit,
                    offset,
                    posts::category_id.eq(category_id),
                    publicly_visible!(now),
                )
                .load(conn)
                .await?
            }
        };

        attach_tags(conn, rows).await
    }

    #[tracing::instrument(skip_all, name = "db.query.posts.list_by_author")]
    async fn list_by_author(
        conn: &mut AsyncPgConnection,
        author_id: UserId,
        viewer: &Viewer,
        now: NaiveDateTime,
        limit: i64,
        offset: i64,
    ) -> QueryResult<Vec<Self>> {
        let rows: Vec<PostRow> = if viewer.is(author_id) {
            // Their own feed shows everything, drafts and scheduled
            // posts included.
            view_query!(limit, offset, posts::author_id.eq(author_id))
                .load(conn)
                .await?
        } else if let Some(user_id) = viewer.user_id() {
            view_query!(
                limit,
                offset,
                posts::author_id.eq(author_id),
                publicly_visible!(now).or(posts::author_id.eq(user_id)),
            )
            .load(conn)
            .await?
        } else {
            view_query!(
                limit,
                offset,
                posts::author_id.eq(author_id),
                publicly_visible!(now),
            )
            .load(conn)
            .await?
        };

        attach_tags(conn, rows).await
    }
}

async fn attach_tags(
    conn: &mut AsyncPgConnection,
    rows: Vec<PostRow>,
) -> QueryResult<Vec<PostView>> {
    let ids = rows.iter().map(|(post, ..)| post.id).collect::<Vec<_>>();
    let mut tags_by_post = tags::for_posts(conn, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let tags = tags_by_post.remove(&row.0.id).unwrap_or_default();
            into_view(row, tags)
        })
        .collect())
}

fn into_view((post, author, category, location): PostRow, tags: Vec<Tag>) -> PostView {
    PostView {
        post,
        author,
        category,
        location,
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use diesel::debug_query;
    use diesel::pg::Pg;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn visibility_filter_translates_the_rule_to_sql() {
        let query = posts::table
            .left_join(categories::table)
            .filter(publicly_visible!(now()))
            .select(posts::id);
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains(r#""posts"."is_published" = "#), "{sql}");
        assert!(sql.contains(r#""posts"."pub_date" <= "#), "{sql}");
        assert!(sql.contains(r#""posts"."category_id" IS NULL"#), "{sql}");
        assert!(sql.contains(r#""categories"."is_published" = "#), "{sql}");
    }

    #[test]
    fn anonymous_list_has_no_author_bypass() {
        let query = view_query!(10, 0, publicly_visible!(now()));
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(!sql.contains(r#""posts"."author_id" ="#), "{sql}");
        assert!(sql.contains(r#"ORDER BY "posts"."pub_date" DESC"#), "{sql}");
        assert!(sql.contains("LIMIT"), "{sql}");
    }

    #[test]
    fn signed_in_list_gets_the_author_bypass() {
        let query = view_query!(
            10,
            0,
            publicly_visible!(now()).or(posts::author_id.eq(UserId(42))),
        );
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains(r#""posts"."author_id" ="#), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
    }

    #[test]
    fn own_feed_query_carries_no_visibility_filter() {
        // mirrors list_by_author when the viewer is the author
        let query = view_query!(10, 0, posts::author_id.eq(UserId(42)));
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(!sql.contains("is_published"), "{sql}");
        assert!(!sql.contains(r#""pub_date" <= "#), "{sql}");
    }
}
