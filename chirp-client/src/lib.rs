//! Клиентская библиотека для работы с chirp-server.
//!
//! Состоит из двух слоёв:
//! - транспорт (`ChirpApi`, `ChirpClient`, `QueryCache`), фича `transport`;
//! - view-модели без привязки к UI-фреймворку (`view`), доступны всегда,
//!   в том числе для wasm-фронтенда.
//!
//! Клиент хранит сессионный токен identity provider'а и подставляет его
//! в защищённые операции.
#![warn(missing_docs)]

mod error;
mod models;
pub mod view;

#[cfg(feature = "transport")]
mod api;
#[cfg(feature = "transport")]
mod http_client;
#[cfg(feature = "transport")]
mod query;

#[cfg(test)]
mod test_support;

pub use error::{ChirpClientError, ChirpClientResult};
pub use models::{ApiErrorBody, CreatePostPayload, FeedItem, FieldErrors, Post, User};
pub use view::composer::{ComposerEffect, MutationResult, PostComposer};
pub use view::session::Session;

#[cfg(feature = "transport")]
pub use api::ChirpApi;
#[cfg(feature = "transport")]
pub use query::{QueryCache, QueryResult};

#[cfg(feature = "transport")]
use async_trait::async_trait;
#[cfg(feature = "transport")]
use http_client::HttpClient;

#[cfg(feature = "transport")]
#[derive(Debug, Clone)]
/// HTTP-клиент сервиса с опциональным сессионным токеном.
pub struct ChirpClient {
    http: HttpClient,
    token: Option<String>,
}

#[cfg(feature = "transport")]
impl ChirpClient {
    /// Создаёт клиент для сервера по базовому URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> ChirpClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Устанавливает сессионный токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn require_token(&self) -> ChirpClientResult<&str> {
        self.token.as_deref().ok_or(ChirpClientError::Unauthorized)
    }
}

#[cfg(feature = "transport")]
#[async_trait]
impl ChirpApi for ChirpClient {
    async fn get_all(&self) -> ChirpClientResult<Vec<FeedItem>> {
        self.http.list_posts().await
    }

    async fn get_post(&self, id: &str) -> ChirpClientResult<FeedItem> {
        self.http.get_post(id).await
    }

    async fn get_posts_by_user(&self, user_id: &str) -> ChirpClientResult<Vec<FeedItem>> {
        self.http.list_user_posts(user_id).await
    }

    async fn get_user_by_username(&self, username: &str) -> ChirpClientResult<User> {
        self.http.get_profile(username).await
    }

    /// Требует установленный токен.
    async fn create_post(&self, content: &str) -> ChirpClientResult<FeedItem> {
        let token = self.require_token()?;
        self.http.create_post(token, content).await
    }
}
