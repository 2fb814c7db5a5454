use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryData {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub slug: String,
}
