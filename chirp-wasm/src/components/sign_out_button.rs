use chirp_client::view::SignOutDialog;
use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub(crate) fn SignOutButton(state: AppState) -> impl IntoView {
    let dialog = RwSignal::new(SignOutDialog::default());

    let on_confirm = move |_: MouseEvent| {
        let session = state.session();
        let result = dialog.try_update(|dialog| dialog.confirm(&session));
        if let Some(Err(err)) = result {
            leptos::logging::error!("sign out failed: {err}");
        }
    };

    view! {
        <button class="sign-out" on:click=move |_| dialog.update(SignOutDialog::open)>
            {SignOutDialog::BUTTON_LABEL}
        </button>
        <Show when=move || dialog.with(SignOutDialog::is_open)>
            <div class="dialog" role="dialog" aria-modal="true">
                <div class="dialog-body">
                    <h2>{SignOutDialog::TITLE}</h2>
                    <p>{SignOutDialog::PROMPT}</p>
                    <button on:click=move |_| dialog.update(SignOutDialog::cancel)>
                        {SignOutDialog::CANCEL_LABEL}
                    </button>
                    <button on:click=on_confirm>{SignOutDialog::CONFIRM_LABEL}</button>
                </div>
            </div>
        </Show>
    }
}
