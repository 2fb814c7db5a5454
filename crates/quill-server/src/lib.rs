mod app;

pub mod auth;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod services;

pub use self::app::App;
pub use self::error::{ApiError, ApiErrorCategory};
pub use self::routes::build_axum_router;
