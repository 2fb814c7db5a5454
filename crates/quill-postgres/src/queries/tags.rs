use diesel::prelude::*;
use diesel::QueryResult;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use std::collections::HashMap;

use quill_model::id::PostId;
use quill_model::schema::{post_tags, tags};
use quill_model::Tag;

#[tracing::instrument(skip_all, name = "db.query.tags.for_post")]
pub async fn for_post(conn: &mut AsyncPgConnection, post_id: PostId) -> QueryResult<Vec<Tag>> {
    post_tags::table
        .inner_join(tags::table)
        .filter(post_tags::post_id.eq(post_id))
        .select(Tag::as_select())
        .order(tags::tag.asc())
        .load(conn)
        .await
}

#[tracing::instrument(skip_all, name = "db.query.tags.for_posts")]
pub async fn for_posts(
    conn: &mut AsyncPgConnection,
    post_ids: &[PostId],
) -> QueryResult<HashMap<PostId, Vec<Tag>>> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(PostId, Tag)> = post_tags::table
        .inner_join(tags::table)
        .filter(post_tags::post_id.eq_any(post_ids.iter().copied()))
        .select((post_tags::post_id, Tag::as_select()))
        .order(tags::tag.asc())
        .load(conn)
        .await?;

    let mut grouped: HashMap<PostId, Vec<Tag>> = HashMap::new();
    for (post_id, tag) in rows {
        grouped.entry(post_id).or_default().push(tag);
    }
    Ok(grouped)
}

/// Replaces the post's tag set with `labels`, creating missing tags
/// on the fly. Expects to run inside the caller's transaction.
#[tracing::instrument(skip_all, name = "db.query.tags.replace_for_post")]
pub async fn replace_for_post(
    conn: &mut AsyncPgConnection,
    post_id: PostId,
    labels: &[String],
) -> QueryResult<Vec<Tag>> {
    diesel::delete(post_tags::table.filter(post_tags::post_id.eq(post_id)))
        .execute(conn)
        .await?;

    if labels.is_empty() {
        return Ok(Vec::new());
    }

    let new_tags = labels
        .iter()
        .map(|label| tags::tag.eq(label.as_str()))
        .collect::<Vec<_>>();

    diesel::insert_into(tags::table)
        .values(new_tags)
        .on_conflict(tags::tag)
        .do_nothing()
        .execute(conn)
        .await?;

    let tags: Vec<Tag> = tags::table
        .filter(tags::tag.eq_any(labels))
        .select(Tag::as_select())
        .load(conn)
        .await?;

    let pairs = tags
        .iter()
        .map(|tag| {
            (
                post_tags::post_id.eq(post_id),
                post_tags::tag_id.eq(tag.id),
            )
        })
        .collect::<Vec<_>>();

    diesel::insert_into(post_tags::table)
        .values(pairs)
        .execute(conn)
        .await?;

    Ok(tags)
}
