//! Текущая сессия пользователя как внедряемая зависимость.

use std::fmt::Display;

/// Сессия, выданная identity provider'ом.
///
/// Реализации: файл с токеном в CLI, `localStorage` в браузере,
/// фейки в тестах.
pub trait Session {
    /// Ошибка завершения сессии.
    type Error: Display;

    /// Есть ли вошедший пользователь.
    fn is_signed_in(&self) -> bool;

    /// Завершает сессию.
    fn sign_out(&self) -> Result<(), Self::Error>;
}
