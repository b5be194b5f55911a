use std::sync::Arc;

use tracing::debug;

use crate::data::identity_provider::IdentityProvider;
use crate::domain::error::DomainError;
use crate::domain::user::{ProjectedUser, normalize_handle};

pub(crate) struct ProfileService {
    identity: Arc<dyn IdentityProvider>,
}

impl ProfileService {
    pub(crate) fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Принимает и `alice`, и `@alice`.
    pub(crate) async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<ProjectedUser, DomainError> {
        let handle = normalize_handle(username);
        if handle.is_empty() {
            return Err(DomainError::NotFound("user not found".to_string()));
        }

        let record = self
            .identity
            .get_user_by_username(handle)
            .await?
            .ok_or_else(|| DomainError::NotFound("user not found".to_string()))?;

        debug!(user_id = %record.id, handle, "profile resolved");
        Ok(ProjectedUser::from(&record))
    }
}
