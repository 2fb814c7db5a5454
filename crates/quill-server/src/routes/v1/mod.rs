use axum::Router;

use crate::App;

mod categories;
mod comments;
mod morphers;
mod posts;
mod users;

/// Builds the base router for Quill API v1.
pub fn build_axum_router(app: App) -> Router {
    Router::new()
        .merge(self::categories::routes())
        .merge(self::comments::routes())
        .merge(self::posts::routes())
        .merge(self::users::routes())
        .with_state(app)
}
