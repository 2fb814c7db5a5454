use chrono::NaiveDateTime;

use crate::id::CategoryId;

#[derive(Debug, Clone, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: CategoryId,
    pub created: NaiveDateTime,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
}
