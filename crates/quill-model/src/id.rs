use diesel_derive_newtype::DieselNewType;

#[derive(DieselNewType, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(DieselNewType, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(pub i64);

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(DieselNewType, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommentId(pub i64);

impl From<i64> for CommentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(DieselNewType, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId(pub i32);

impl From<i32> for CategoryId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[derive(DieselNewType, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationId(pub i32);

impl From<i32> for LocationId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[derive(DieselNewType, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(pub i32);

impl From<i32> for TagId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
