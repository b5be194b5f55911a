use chirp_client::Session;
use chirp_client::view::{Route, RouteError};
use leptos::prelude::*;

use crate::{navigation, storage};

/// Общее состояние фронтенда. Все поля это сигналы, так что копирование дёшево.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) route: RwSignal<Result<Route, RouteError>>,
    pub(crate) token: RwSignal<Option<String>>,
    /// Версия глобальной ленты; рост версии заставляет ленту перезапроситься.
    pub(crate) feed_version: RwSignal<u64>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            route: RwSignal::new(navigation::current_route()),
            token: RwSignal::new(storage::load_token()),
            feed_version: RwSignal::new(0),
        }
    }

    pub(crate) fn navigate(&self, href: &str) {
        self.route.set(navigation::push(href));
    }

    pub(crate) fn go_back(&self) {
        if let Some(route) = navigation::back() {
            self.route.set(route);
        }
    }

    pub(crate) fn invalidate_feed(&self) {
        self.feed_version.update(|version| *version += 1);
    }

    pub(crate) fn session(&self) -> BrowserSession {
        BrowserSession { token: self.token }
    }
}

/// Сессия браузера: токен в `localStorage`, зеркало в сигнале.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BrowserSession {
    token: RwSignal<Option<String>>,
}

impl BrowserSession {
    pub(crate) fn token(&self) -> Option<String> {
        self.token.get_untracked()
    }

    pub(crate) fn sign_in(&self, raw: &str) -> Result<(), String> {
        let token = storage::save_token(raw)?;
        self.token.set(Some(token));
        Ok(())
    }
}

impl Session for BrowserSession {
    type Error = String;

    fn is_signed_in(&self) -> bool {
        self.token.with(Option::is_some)
    }

    fn sign_out(&self) -> Result<(), Self::Error> {
        storage::clear_token()?;
        self.token.set(None);
        Ok(())
    }
}
