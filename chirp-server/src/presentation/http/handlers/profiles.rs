use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::handlers::posts::UserDto;

#[utoipa::path(
    get,
    path = "/api/profiles/{username}",
    tag = "profiles",
    params(
        ("username" = String, Path, description = "Handle, with or without a leading @")
    ),
    responses(
        (status = 200, description = "Profile found", body = UserDto),
        (status = 404, description = "User not found"),
        (status = 502, description = "Identity provider unavailable")
    )
)]
pub(crate) async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state
        .profile_service
        .get_user_by_username(&username)
        .await?;

    Ok((StatusCode::OK, Json(UserDto::from(user))))
}
