use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::handlers::posts::{CreatePostDto, FeedItemDto, PostDto, UserDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::list_user_posts,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::profiles::get_profile
    ),
    components(
        schemas(
            CreatePostDto,
            PostDto,
            UserDto,
            FeedItemDto
        )
    ),
    tags(
        (name = "posts", description = "Feed and post endpoints"),
        (name = "profiles", description = "Public user profiles")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

/// Сессионный токен identity provider'а в `Authorization: Bearer`.
pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
