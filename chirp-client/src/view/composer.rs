use tracing::{info, warn};

use super::session::Session;
use crate::error::ChirpClientError;
use crate::models::{FeedItem, FieldErrors};

#[cfg(feature = "transport")]
use crate::{api::ChirpApi, query::QueryCache};

/// Итог мутации создания поста.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationResult {
    /// Пост создан.
    Success(FeedItem),
    /// Сервер отклонил ввод.
    ValidationError {
        /// Поле -> сообщения.
        field_errors: FieldErrors,
    },
    /// Любая другая ошибка: сеть, авторизация, сервер.
    GenericError,
}

impl MutationResult {
    /// Классифицирует результат вызова. Причина общей ошибки логируется.
    pub fn from_result<E: AsRef<ChirpClientError>>(result: Result<FeedItem, E>) -> Self {
        match result {
            Ok(item) => Self::Success(item),
            Err(err) => match err.as_ref() {
                ChirpClientError::Validation { field_errors } => Self::ValidationError {
                    field_errors: field_errors.clone(),
                },
                other => {
                    warn!(error = %other, "create post failed");
                    Self::GenericError
                }
            },
        }
    }
}

/// Что должен сделать вызывающий после завершения мутации.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerEffect {
    /// Глобальная лента устарела.
    InvalidateFeed,
}

/// Форма создания поста.
///
/// Существует только для вошедшего пользователя. Пока мутация в полёте,
/// ввод заблокирован и второй submit не стартует.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostComposer {
    input: String,
    is_posting: bool,
    message: Option<String>,
    message_id: u64,
}

impl PostComposer {
    /// Подсказка в поле ввода.
    pub const PLACEHOLDER: &'static str = "Type some emojis!";
    /// Надпись на кнопке отправки.
    pub const SUBMIT_LABEL: &'static str = "Post";
    /// Сообщение для любой ошибки, кроме ошибки поля `content`.
    pub const GENERIC_FAILURE: &'static str = "Failed to post! Please try again later.";

    /// `None` для анонимной сессии: композер не показывается вовсе.
    pub fn for_session<S: Session>(session: &S) -> Option<Self> {
        session.is_signed_in().then(Self::default)
    }

    /// Текущий ввод.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Меняет ввод. Во время отправки поле заблокировано.
    pub fn set_input(&mut self, input: impl Into<String>) {
        if !self.is_posting {
            self.input = input.into();
        }
    }

    /// Идёт ли отправка.
    pub fn is_posting(&self) -> bool {
        self.is_posting
    }

    /// Сообщение об ошибке для snackbar.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Номер последнего показанного сообщения. Растёт с каждым новым.
    pub fn message_id(&self) -> u64 {
        self.message_id
    }

    /// Закрывает сообщение.
    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    /// Закрывает сообщение, только если оно всё ещё то же, что было
    /// показано под номером `shown`. Таймер старого сообщения не трогает новое.
    pub fn dismiss_message_if(&mut self, shown: u64) {
        if self.message_id == shown {
            self.message = None;
        }
    }

    fn show_message(&mut self, message: String) {
        self.message_id += 1;
        self.message = Some(message);
    }

    /// Ввод не пуст и отправка не идёт. Кнопка показывается только тогда.
    pub fn can_submit(&self) -> bool {
        !self.input.is_empty() && !self.is_posting
    }

    /// Начинает отправку и возвращает текст для мутации.
    ///
    /// `None`, если отправлять нельзя: тогда удалённого вызова быть не должно.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.is_posting = true;
        Some(self.input.clone())
    }

    /// Завершает отправку.
    ///
    /// Успех очищает ввод и требует одну инвалидацию ленты. Ошибка поля
    /// `content` показывается дословно, остальные общим сообщением.
    pub fn finish_submit(&mut self, outcome: &MutationResult) -> Option<ComposerEffect> {
        self.is_posting = false;

        match outcome {
            MutationResult::Success(item) => {
                info!(post_id = %item.post.id, "post published");
                self.input.clear();
                self.message = None;
                Some(ComposerEffect::InvalidateFeed)
            }
            MutationResult::ValidationError { field_errors } => {
                let message = field_errors
                    .get("content")
                    .and_then(|messages| messages.first())
                    .cloned()
                    .unwrap_or_else(|| Self::GENERIC_FAILURE.to_string());
                self.show_message(message);
                None
            }
            MutationResult::GenericError => {
                self.show_message(Self::GENERIC_FAILURE.to_string());
                None
            }
        }
    }

    /// Полный цикл: мутация через `api`, затем инвалидация ленты в `cache`.
    ///
    /// `None`, если submit не принят и вызова не было.
    #[cfg(feature = "transport")]
    pub async fn submit(
        &mut self,
        api: &dyn ChirpApi,
        cache: &QueryCache,
    ) -> Option<MutationResult> {
        let content = self.begin_submit()?;

        let outcome = MutationResult::from_result(api.create_post(&content).await);
        if let Some(ComposerEffect::InvalidateFeed) = self.finish_submit(&outcome) {
            cache.invalidate_feed().await;
        }
        Some(outcome)
    }
}
