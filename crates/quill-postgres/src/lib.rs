//! PostgreSQL driver for Quill: connection pooling and the query
//! layer over the domain model.
pub mod error;
pub mod pool;
pub mod queries;

pub use self::pool::{PgConnection, PgPool};
