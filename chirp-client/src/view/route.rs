use thiserror::Error;

/// Маршруты фронтенда.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: лента и композер.
    Home,
    /// `/@{handle}`: профиль. Сегмент без `@` тоже считается handle.
    Profile {
        /// Handle без `@`.
        handle: String,
    },
    /// `/post/{id}`: один пост.
    Post {
        /// Id поста.
        id: String,
    },
}

/// Ошибка маршрутизации. Это ошибка приложения, а не сообщение пользователю.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Параметр маршрута отсутствует или пуст.
    #[error("missing route parameter: {0}")]
    MissingParam(&'static str),

    /// Путь не соответствует ни одному маршруту.
    #[error("unknown route: {0}")]
    Unknown(String),
}

/// `@alice` -> `alice`. Снимается ровно один ведущий `@`.
pub fn handle_from_slug(slug: &str) -> &str {
    let slug = slug.trim();
    slug.strip_prefix('@').unwrap_or(slug)
}

/// `alice` -> `@alice`. Обратная к [`handle_from_slug`] форма для путей.
pub fn profile_slug(handle: &str) -> String {
    format!("@{handle}")
}

impl Route {
    /// Разбирает путь без схемы и хоста. Query и fragment отбрасываются.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_matches('/');

        if path.is_empty() {
            return Ok(Self::Home);
        }

        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            ["post"] | ["post", ""] => Err(RouteError::MissingParam("id")),
            ["post", id] => Ok(Self::Post {
                id: (*id).to_string(),
            }),
            [slug] => {
                let handle = handle_from_slug(slug);
                if handle.is_empty() {
                    return Err(RouteError::MissingParam("slug"));
                }
                Ok(Self::Profile {
                    handle: handle.to_string(),
                })
            }
            _ => Err(RouteError::Unknown(path.to_string())),
        }
    }

    /// Канонический путь маршрута.
    pub fn href(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Profile { handle } => format!("/{}", profile_slug(handle)),
            Self::Post { id } => format!("/post/{id}"),
        }
    }
}

/// Куда ведёт кнопка «назад».
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackNavigation {
    /// Предыдущая запись истории.
    HistoryBack,
    /// Истории нет, переход на `/`.
    Home,
}

/// Первая запись истории это текущая страница, так что назад идти некуда.
pub fn back_navigation(history_length: u32) -> BackNavigation {
    if history_length > 1 {
        BackNavigation::HistoryBack
    } else {
        BackNavigation::Home
    }
}
