use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::QueryResult;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use quill_model::id::{CommentId, PostId};
use quill_model::schema::comments;
use quill_model::Comment;

pub trait CommentPgImpl: Sized {
    async fn find(conn: &mut AsyncPgConnection, id: CommentId)
        -> QueryResult<Option<Self>>;

    /// Comments of a post, oldest first. Visibility of the post
    /// itself is the caller's concern.
    async fn list_for_post(
        conn: &mut AsyncPgConnection,
        post_id: PostId,
    ) -> QueryResult<Vec<Self>>;

    async fn create(
        conn: &mut AsyncPgConnection,
        post_id: PostId,
        author_id: quill_model::id::UserId,
        text: &str,
    ) -> QueryResult<Self>;

    async fn update_text(
        conn: &mut AsyncPgConnection,
        id: CommentId,
        text: &str,
    ) -> QueryResult<Self>;

    async fn delete(conn: &mut AsyncPgConnection, id: CommentId) -> QueryResult<usize>;
}

/// Comments are always returned in creation order, oldest first.
fn for_post_query(post_id: PostId) -> comments::BoxedQuery<'static, Pg> {
    comments::table
        .filter(comments::post_id.eq(post_id))
        .order(comments::created.asc())
        .into_boxed()
}

impl CommentPgImpl for Comment {
    #[tracing::instrument(skip_all, name = "db.query.comments.find")]
    async fn find(
        conn: &mut AsyncPgConnection,
        id: CommentId,
    ) -> QueryResult<Option<Self>> {
        comments::table
            .find(id)
            .select(Comment::as_select())
            .get_result(conn)
            .await
            .optional()
    }

    #[tracing::instrument(skip_all, name = "db.query.comments.list_for_post")]
    async fn list_for_post(
        conn: &mut AsyncPgConnection,
        post_id: PostId,
    ) -> QueryResult<Vec<Self>> {
        for_post_query(post_id).load(conn).await
    }

    #[tracing::instrument(skip_all, name = "db.query.comments.insert")]
    async fn create(
        conn: &mut AsyncPgConnection,
        post_id: PostId,
        author_id: quill_model::id::UserId,
        text: &str,
    ) -> QueryResult<Self> {
        diesel::insert_into(comments::table)
            .values((
                comments::post_id.eq(post_id),
                comments::author_id.eq(author_id),
                comments::text.eq(text),
            ))
            .returning(Comment::as_returning())
            .get_result(conn)
            .await
    }

    #[tracing::instrument(skip_all, name = "db.query.comments.update")]
    async fn update_text(
        conn: &mut AsyncPgConnection,
        id: CommentId,
        text: &str,
    ) -> QueryResult<Self> {
        diesel::update(comments::table.find(id))
            .set(comments::text.eq(text))
            .returning(Comment::as_returning())
            .get_result(conn)
            .await
    }

    #[tracing::instrument(skip_all, name = "db.query.comments.delete")]
    async fn delete(conn: &mut AsyncPgConnection, id: CommentId) -> QueryResult<usize> {
        diesel::delete(comments::table.find(id)).execute(conn).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    #[test]
    fn comments_are_ordered_by_creation_time_ascending() {
        let query = for_post_query(PostId(7));
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(
            sql.contains(r#"ORDER BY "comments"."created" ASC"#),
            "{sql}"
        );
        assert!(sql.contains(r#""comments"."post_id" = "#), "{sql}");
    }
}
