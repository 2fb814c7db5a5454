use chrono::NaiveDateTime;

use crate::id::LocationId;

#[derive(Debug, Clone, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = crate::schema::locations)]
pub struct Location {
    pub id: LocationId,
    pub created: NaiveDateTime,
    pub name: String,
    pub is_published: bool,
}
