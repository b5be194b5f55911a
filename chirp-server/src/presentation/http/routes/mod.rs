use axum::Router;

use crate::presentation::AppState;

pub(crate) mod posts;
pub(crate) mod profiles;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/posts", posts::router(state))
        .nest("/api/users", users::router())
        .nest("/api/profiles", profiles::router())
}
