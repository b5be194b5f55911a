use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Поле -> сообщения валидации.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичная проекция пользователя.
pub struct User {
    /// Идентификатор пользователя у identity provider'а.
    pub id: String,
    /// Handle без `@`.
    pub username: Option<String>,
    /// Ссылка на аватар.
    pub profile_image_url: String,
    /// Имя.
    pub first_name: Option<String>,
    /// Фамилия.
    pub last_name: Option<String>,
    /// Основной email, если он указан.
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста (непрозрачная строка).
    pub id: String,
    /// Текст поста.
    pub content: String,
    /// Идентификатор автора.
    pub author_id: String,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Пост вместе с автором. Порядок в ленте задаёт сервер.
pub struct FeedItem {
    /// Пост.
    pub post: Post,
    /// Автор поста.
    pub author: User,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Тело ошибки, которое возвращает сервер.
pub struct ApiErrorBody {
    /// Человекочитаемое описание.
    #[serde(default)]
    pub error: Option<String>,
    /// Ошибки валидации по полям.
    #[serde(default)]
    pub field_errors: Option<FieldErrors>,
}

#[derive(Debug, Serialize)]
/// Тело запроса на создание поста.
pub struct CreatePostPayload<'a> {
    /// Текст поста.
    pub content: &'a str,
}
