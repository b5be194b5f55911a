use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::post::{CreatePostRequest, FeedItem, Post};
use crate::domain::user::ProjectedUser;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    /// Обрезается по краям, 1..=280 символов.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub(crate) content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: Uuid,
    pub(crate) content: String,
    pub(crate) author_id: String,
    pub(crate) created_at: DateTime<Utc>,
}

/// Проекция пользователя: единственный вид, в котором пользователь уходит клиенту.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: String,
    pub(crate) username: Option<String>,
    pub(crate) profile_image_url: String,
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FeedItemDto {
    pub(crate) post: PostDto,
    pub(crate) author: UserDto,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            content: post.content,
            author_id: post.author_id,
            created_at: post.created_at,
        }
    }
}

impl From<ProjectedUser> for UserDto {
    fn from(user: ProjectedUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            profile_image_url: user.profile_image_url,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

impl From<FeedItem> for FeedItemDto {
    fn from(item: FeedItem) -> Self {
        Self {
            post: PostDto::from(item.post),
            author: UserDto::from(item.author),
        }
    }
}

fn into_dtos(items: Vec<FeedItem>) -> Vec<FeedItemDto> {
    items.into_iter().map(FeedItemDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Global feed, newest first", body = [FeedItemDto]),
        (status = 500, description = "Internal error"),
        (status = 502, description = "Identity provider unavailable")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<FeedItemDto>>)> {
    let items = state.feed_service.get_all().await?;

    Ok((StatusCode::OK, Json(into_dtos(items))))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = FeedItemDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<FeedItemDto>)> {
    let item = state.feed_service.get_by_id(&id).await?;

    Ok((StatusCode::OK, Json(FeedItemDto::from(item))))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/posts",
    tag = "posts",
    params(
        ("user_id" = String, Path, description = "Identity provider user id")
    ),
    responses(
        (status = 200, description = "Posts of one author, newest first", body = [FeedItemDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_user_posts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<(StatusCode, Json<Vec<FeedItemDto>>)> {
    let items = state.feed_service.get_by_user_id(&user_id).await?;

    Ok((StatusCode::OK, Json(into_dtos(items))))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = FeedItemDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<FeedItemDto>)> {
    debug!(user_id = %auth.user_id, session_id = ?auth.session_id, "create post request");
    dto.validate()?;
    let req = CreatePostRequest {
        content: dto.content,
    };

    let item = state.feed_service.create(&auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(FeedItemDto::from(item))))
}
