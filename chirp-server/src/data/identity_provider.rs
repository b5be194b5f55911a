use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::IdentityRecord;

/// Внешний сервис пользователей. Сервер не хранит пользователей сам.
#[async_trait]
pub(crate) trait IdentityProvider: Send + Sync {
    /// Возвращает найденные записи; отсутствующие id просто не попадают в ответ.
    async fn get_users(&self, ids: &[String]) -> Result<Vec<IdentityRecord>, DomainError>;
    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<IdentityRecord>, DomainError>;
}
