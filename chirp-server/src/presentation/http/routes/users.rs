use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::list_user_posts;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/{user_id}/posts", get(list_user_posts))
}
