//! Business logic of every API operation, one command per operation.
//!
//! Commands carry validated-enough input from the routing layer and
//! run against the database through [`crate::App`]. Route handlers do
//! nothing but convert wire forms into commands and command results
//! back into wire objects.
pub mod categories;
pub mod comments;
pub mod posts;
pub mod users;
pub mod util;
