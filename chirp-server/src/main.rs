use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

#[cfg(test)]
mod test_support;

use application::feed_service::FeedService;
use application::profile_service::ProfileService;
use data::repositories::identity::http_identity_provider::HttpIdentityProvider;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level, settings.log_format)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let identity = Arc::new(HttpIdentityProvider::new(
        &settings.identity_api_url,
        &settings.identity_secret_key,
        Duration::from_secs(settings.identity_request_timeout_secs),
    )?);
    let posts = Arc::new(PostgresPostRepository::new(pool));

    let feed_service = Arc::new(FeedService::new(posts, identity.clone()));
    let profile_service = Arc::new(ProfileService::new(identity));
    let jwt = Arc::new(JwtService::new(&settings.session_jwt_secret));

    let state = AppState::new(feed_service, profile_service, jwt);

    server::run_http(&settings, state).await
}
