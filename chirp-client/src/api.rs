use async_trait::async_trait;

use crate::error::ChirpClientResult;
use crate::models::{FeedItem, User};

/// Удалённые процедуры сервиса. Шов для подмены транспорта в тестах.
#[async_trait]
pub trait ChirpApi: Send + Sync {
    /// Глобальная лента, новые посты первыми.
    async fn get_all(&self) -> ChirpClientResult<Vec<FeedItem>>;

    /// Один пост с автором.
    async fn get_post(&self, id: &str) -> ChirpClientResult<FeedItem>;

    /// Лента одного автора.
    async fn get_posts_by_user(&self, user_id: &str) -> ChirpClientResult<Vec<FeedItem>>;

    /// Профиль по handle, из которого маршрут уже снял `@`. Handle
    /// передаётся как есть.
    async fn get_user_by_username(&self, username: &str) -> ChirpClientResult<User>;

    /// Создаёт пост от имени текущей сессии.
    async fn create_post(&self, content: &str) -> ChirpClientResult<FeedItem>;
}
