use thiserror::Error;

use crate::models::{ApiErrorBody, FieldErrors};

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `chirp-client`.
pub enum ChirpClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[cfg(feature = "transport")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Требуется авторизация (отсутствует/некорректен токен).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Сервер отклонил ввод: сообщения сгруппированы по полям.
    #[error("validation failed")]
    Validation {
        /// Поле -> список сообщений.
        field_errors: FieldErrors,
    },

    /// Некорректный запрос или прочая ошибка сервера.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `chirp-client`.
pub type ChirpClientResult<T> = Result<T, ChirpClientError>;

impl AsRef<ChirpClientError> for ChirpClientError {
    fn as_ref(&self) -> &ChirpClientError {
        self
    }
}

impl ChirpClientError {
    /// Классифицирует неуспешный HTTP-ответ по статусу и телу ошибки.
    ///
    /// Не зависит от транспорта: используется и `reqwest`-клиентом,
    /// и браузерным фронтендом.
    pub fn from_http_status(status: u16, body: Option<ApiErrorBody>) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound,
            _ => {
                let body = body.unwrap_or_default();
                if let Some(field_errors) = body.field_errors.filter(|errors| !errors.is_empty()) {
                    return Self::Validation { field_errors };
                }
                Self::InvalidRequest(
                    body.error
                        .unwrap_or_else(|| format!("http status {status}")),
                )
            }
        }
    }

    #[cfg(feature = "transport")]
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status.as_u16(), None);
        }
        Self::Http(err)
    }
}
