use std::sync::Arc;

use crate::application::feed_service::FeedService;
use crate::application::profile_service::ProfileService;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod http;
pub(crate) mod http_handlers;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) feed_service: Arc<FeedService>,
    pub(crate) profile_service: Arc<ProfileService>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        feed_service: Arc<FeedService>,
        profile_service: Arc<ProfileService>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            feed_service,
            profile_service,
            jwt,
        }
    }
}
