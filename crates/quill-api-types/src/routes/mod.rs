//! Request and response bodies, grouped by route family.
pub mod categories;
pub mod comments;
pub mod posts;
pub mod users;

use serde::{Deserialize, Serialize};

/// Shared pagination query parameters for list routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pagination {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
