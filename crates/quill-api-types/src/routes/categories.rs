use serde::{Deserialize, Serialize};

use crate::category::CategoryData;
use crate::post::PostData;

/// Response body of the per-category post listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryPostsResponse {
    pub category: CategoryData,
    pub posts: Vec<PostData>,
}
