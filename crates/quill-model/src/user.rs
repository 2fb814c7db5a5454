use bon::Builder;
use chrono::{NaiveDate, NaiveDateTime};

use crate::id::UserId;

#[derive(Debug, Clone, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: UserId,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub birthday: NaiveDate,
    pub avatar: Option<String>,
    pub password_hash: String,
    pub is_staff: bool,
}

#[derive(Builder)]
pub struct InsertUser<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: Option<&'a str>,
    pub birthday: NaiveDate,
    pub password_hash: &'a str,
}

#[derive(Builder, diesel::AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser<'a> {
    #[builder(into)]
    pub first_name: Option<&'a str>,
    pub last_name: Option<Option<&'a str>>,
    pub birthday: Option<NaiveDate>,
    pub avatar: Option<Option<&'a str>>,
    #[builder(into)]
    pub password_hash: Option<&'a str>,
}
