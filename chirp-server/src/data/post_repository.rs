use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) id: Uuid,
    pub(crate) content: String,
    pub(crate) author_id: String,
}

/// Хранилище постов. Все списки отдаются от новых к старым.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    async fn list_recent(&self, limit: u32) -> Result<Vec<Post>, DomainError>;
    async fn list_by_author(&self, author_id: &str, limit: u32)
    -> Result<Vec<Post>, DomainError>;
}
