use tracing::warn;

use crate::error::ChirpClientError;

/// Состояние страницы, построенной на одном запросе.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState<T> {
    /// Запрос ещё выполняется.
    Loading,
    /// Запрос успешен, но показывать нечего.
    Empty,
    /// Ресурс не существует.
    NotFound,
    /// Запрос не удался; внутри текст ошибки для логов.
    Failed(String),
    /// Данные готовы.
    Ready(T),
}

impl<T> PageState<T> {
    /// Текст для пустой ленты автора.
    pub const EMPTY_MESSAGE: &'static str = "No posts yet";
    /// Текст для отсутствующего профиля или поста.
    pub const NOT_FOUND_MESSAGE: &'static str = "404";
    /// Текст для неудачного запроса.
    pub const FAILED_MESSAGE: &'static str = "Something went wrong";

    /// `NotFound` отделяется от прочих ошибок, прочие логируются.
    ///
    /// Принимает и саму ошибку, и `Arc<ChirpClientError>` из кэша.
    pub fn from_result<E: AsRef<ChirpClientError>>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => match err.as_ref() {
                ChirpClientError::NotFound => Self::NotFound,
                other => {
                    warn!(error = %other, "query failed");
                    Self::Failed(other.to_string())
                }
            },
        }
    }

    /// `Ready` с пустыми данными превращается в `Empty`.
    pub fn empty_when(self, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Self::Ready(value) if is_empty(&value) => Self::Empty,
            other => other,
        }
    }

    /// Данные, если они готовы.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Текст, который показывается вместо данных. `None` для `Loading` и `Ready`.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Empty => Some(Self::EMPTY_MESSAGE),
            Self::NotFound => Some(Self::NOT_FOUND_MESSAGE),
            Self::Failed(_) => Some(Self::FAILED_MESSAGE),
            Self::Loading | Self::Ready(_) => None,
        }
    }
}
