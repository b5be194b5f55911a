use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::state::AppState;

/// Вход вставкой session-токена identity provider'а.
#[component]
pub(crate) fn SignIn(state: AppState) -> impl IntoView {
    let raw = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        match state.session().sign_in(&raw.get_untracked()) {
            Ok(()) => {
                raw.set(String::new());
                error.set(None);
            }
            Err(err) => error.set(Some(err)),
        }
    };

    view! {
        <form class="composer" on:submit=on_submit>
            <input
                type="password"
                placeholder="Session token"
                prop:value=move || raw.get()
                on:input=move |ev| raw.set(event_target_value(&ev))
            />
            <button type="submit">"Sign in"</button>
            {move || error.get().map(|err| view! { <div class="snackbar" role="alert">{err}</div> })}
        </form>
    }
}
