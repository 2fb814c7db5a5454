//! Configuration loading for the Quill server.
//!
//! Configuration is merged from three layers, weakest first:
//! built-in defaults, a TOML file (path taken from `QUILL_CONFIG_FILE`,
//! falling back to `quill.toml` in the working directory), then
//! `QUILL_*` environment variables. A `.env` file is loaded before
//! anything else.
mod auth;
mod database;
mod logging;
mod server;

pub use self::auth::Auth;
pub use self::database::{DatabasePool, DatabasePools};
pub use self::logging::{Logging, LoggingStyle};
pub use self::server::Server;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct LoadError;
