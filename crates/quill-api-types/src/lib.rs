//! Wire-facing types for the Quill HTTP API.
//!
//! Everything in this crate is shared between the server and API
//! consumers: request forms, response objects and the error schema.
pub mod error;
pub mod routes;

mod category;
mod comment;
mod post;
mod sensitive;
mod user;

pub use self::category::CategoryData;
pub use self::comment::CommentData;
pub use self::error::{Error, ErrorCategory};
pub use self::post::PostData;
pub use self::sensitive::Sensitive;
pub use self::user::{UserProfile, UserSummary};
