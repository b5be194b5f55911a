use super::session::Session;

/// Диалог подтверждения выхода.
///
/// `Idle -> Confirming -> SignedOut`; из `Confirming` можно вернуться в
/// `Idle` отменой. `SignedOut` конечное.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignOutDialog {
    /// Диалог закрыт.
    #[default]
    Idle,
    /// Диалог открыт и ждёт решения.
    Confirming,
    /// Сессия завершена.
    SignedOut,
}

impl SignOutDialog {
    /// Надпись на кнопке, открывающей диалог.
    pub const BUTTON_LABEL: &'static str = "Sign out";
    /// Заголовок диалога.
    pub const TITLE: &'static str = "Sign Out";
    /// Вопрос в диалоге.
    pub const PROMPT: &'static str = "Are you sure you want to sign out?";
    /// Кнопка отмены.
    pub const CANCEL_LABEL: &'static str = "Cancel";
    /// Кнопка подтверждения.
    pub const CONFIRM_LABEL: &'static str = "Sign Out";

    /// Открыт ли диалог.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Confirming)
    }

    /// `Idle -> Confirming`.
    pub fn open(&mut self) {
        if *self == Self::Idle {
            *self = Self::Confirming;
        }
    }

    /// `Confirming -> Idle`, сессия не трогается.
    pub fn cancel(&mut self) {
        if *self == Self::Confirming {
            *self = Self::Idle;
        }
    }

    /// `Confirming -> SignedOut` с одним вызовом `session.sign_out()`.
    ///
    /// Если сессия не завершилась, диалог остаётся открытым для повтора.
    /// В остальных состояниях ничего не делает.
    pub fn confirm<S: Session>(&mut self, session: &S) -> Result<(), S::Error> {
        if *self != Self::Confirming {
            return Ok(());
        }
        session.sign_out()?;
        *self = Self::SignedOut;
        Ok(())
    }
}
