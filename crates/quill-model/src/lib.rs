//! Domain model of the Quill blog platform.
pub mod category;
pub mod comment;
pub mod id;
pub mod location;
pub mod post;
pub mod schema;
pub mod tag;
pub mod user;
pub mod validation;
pub mod visibility;

pub use self::category::Category;
pub use self::comment::Comment;
pub use self::location::Location;
pub use self::post::{Post, PostView};
pub use self::tag::Tag;
pub use self::user::User;
pub use self::visibility::Viewer;
