pub mod categories;
pub mod comments;
pub mod locations;
pub mod posts;
pub mod tags;
pub mod users;

mod util;
