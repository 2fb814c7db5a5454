use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The compact author object embedded in posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}

/// The full profile object, only ever shown for the session user
/// or on public profile pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub joined_at: NaiveDateTime,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub birthday: NaiveDate,
    pub avatar: Option<String>,
}
