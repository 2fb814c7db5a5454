use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::category::CategoryData;
use crate::user::UserSummary;

/// This object contains the summarized data of a post as it is
/// rendered in list and detail views.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostData {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub pub_date: NaiveDateTime,
    pub title: String,
    pub text: String,
    pub is_published: bool,
    pub author: UserSummary,
    pub category: Option<CategoryData>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
}
