use chirp_client::view::{BackNavigation, Route, RouteError, back_navigation};
use leptos::prelude::*;
use wasm_bindgen::JsValue;

/// Текущий маршрут по `location.pathname`.
pub(crate) fn current_route() -> Result<Route, RouteError> {
    let path = window().location().pathname().unwrap_or_else(|_| "/".to_string());
    Route::parse(&path)
}

/// Кладёт `href` в историю и возвращает новый маршрут.
pub(crate) fn push(href: &str) -> Result<Route, RouteError> {
    if let Ok(history) = window().history() {
        if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(href)) {
            leptos::logging::error!("pushState failed: {err:?}");
        }
    }
    Route::parse(href)
}

/// Назад по истории, а без истории на `/`.
pub(crate) fn back() -> Option<Result<Route, RouteError>> {
    let history = window().history().ok()?;
    match back_navigation(history.length().unwrap_or_default()) {
        BackNavigation::HistoryBack => {
            // Маршрут обновит обработчик popstate.
            if let Err(err) = history.back() {
                leptos::logging::error!("history.back failed: {err:?}");
            }
            None
        }
        BackNavigation::Home => Some(push(&Route::Home.href())),
    }
}

pub(crate) fn set_title(title: &str) {
    document().set_title(title);
}
