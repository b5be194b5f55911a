use chirp_client::{ComposerEffect, MutationResult, PostComposer};
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::loading::SubmitPostLoading;
use crate::state::AppState;

const SNACKBAR_MS: u64 = 3000;

fn submit(state: AppState, composer: RwSignal<PostComposer>) {
    let session = state.session();
    let Some(token) = session.token() else {
        return;
    };
    let Some(content) = composer.try_update(PostComposer::begin_submit).flatten() else {
        return;
    };

    spawn_local(async move {
        let outcome = MutationResult::from_result(api::create_post(&token, &content).await);
        let effect = composer
            .try_update(|current| current.finish_submit(&outcome))
            .flatten();

        match effect {
            Some(ComposerEffect::InvalidateFeed) => state.invalidate_feed(),
            None => {
                let shown = composer.with_untracked(PostComposer::message_id);
                set_timeout(
                    move || composer.update(|current| current.dismiss_message_if(shown)),
                    std::time::Duration::from_millis(SNACKBAR_MS),
                );
            }
        }
    });
}

/// Форма нового поста. Для анонимной сессии не рендерится.
#[component]
pub(crate) fn CreatePostWizard(state: AppState) -> impl IntoView {
    move || {
        let session = state.session();
        PostComposer::for_session(&session).map(|initial| {
            let composer = RwSignal::new(initial);
            view! { <ComposerForm state=state composer=composer /> }
        })
    }
}

#[component]
fn ComposerForm(state: AppState, composer: RwSignal<PostComposer>) -> impl IntoView {
    let on_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Enter" {
            submit(state, composer);
        }
    };

    view! {
        <div class="composer">
            <input
                placeholder=PostComposer::PLACEHOLDER
                prop:value=move || composer.with(|c| c.input().to_string())
                prop:disabled=move || composer.with(PostComposer::is_posting)
                on:input=move |ev| composer.update(|c| c.set_input(event_target_value(&ev)))
                on:keydown=on_keydown
            />
            <Show when=move || composer.with(PostComposer::can_submit)>
                <button on:click=move |_| submit(state, composer)>
                    {PostComposer::SUBMIT_LABEL}
                </button>
            </Show>
            <Show when=move || composer.with(PostComposer::is_posting)>
                <SubmitPostLoading />
            </Show>
            {move || {
                composer
                    .with(|c| c.message().map(str::to_string))
                    .map(|message| {
                        view! {
                            <div class="snackbar" role="alert">
                                {message}
                                <button on:click=move |_| composer.update(PostComposer::dismiss_message)>
                                    "×"
                                </button>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
