use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub(crate) fn GoBack(state: AppState) -> impl IntoView {
    let on_click = move |ev: MouseEvent| {
        ev.prevent_default();
        state.go_back();
    };

    view! {
        <a href="/" class="go-back" aria-label="back" on:click=on_click>
            "←"
        </a>
    }
}
