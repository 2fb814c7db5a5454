use crate::id::TagId;

#[derive(Debug, Clone, PartialEq, Eq, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = crate::schema::tags)]
pub struct Tag {
    pub id: TagId,
    pub tag: String,
}
