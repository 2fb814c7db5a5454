use chrono::NaiveDateTime;

use crate::id::{CommentId, PostId, UserId};

/// A comment on a post. Comments are always listed in creation
/// order, oldest first.
#[derive(Debug, Clone, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = crate::schema::comments)]
pub struct Comment {
    pub id: CommentId,
    pub created: NaiveDateTime,
    pub text: String,
    pub author_id: UserId,
    pub post_id: PostId,
}
