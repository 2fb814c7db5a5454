use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::user::UserSummary;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommentData {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub text: String,
    pub author: UserSummary,
    pub post_id: i64,
}
