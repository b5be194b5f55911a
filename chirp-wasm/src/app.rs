use chirp_client::Session;
use chirp_client::view::{PageState, Route};
use leptos::prelude::*;

use crate::components::composer::CreatePostWizard;
use crate::components::feed::Feed;
use crate::components::layout::LayoutPage;
use crate::components::loading::PageMessage;
use crate::components::profile_page::ProfilePage;
use crate::components::sign_in::SignIn;
use crate::components::sign_out_button::SignOutButton;
use crate::components::single_post_page::SinglePostPage;
use crate::navigation;
use crate::state::AppState;

const HOME_TITLE: &str = "Chirp";

#[component]
fn HomePage(state: AppState) -> impl IntoView {
    navigation::set_title(HOME_TITLE);

    view! {
        <LayoutPage>
            <div class="header">
                {move || {
                    if state.session().is_signed_in() {
                        view! {
                            <CreatePostWizard state=state />
                            <SignOutButton state=state />
                        }
                        .into_any()
                    } else {
                        view! { <SignIn state=state /> }.into_any()
                    }
                }}
            </div>
            <Feed state=state />
        </LayoutPage>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    // Приложение живёт до закрытия вкладки, слушатель не снимается.
    let _ = window_event_listener(leptos::ev::popstate, move |_| {
        state.route.set(navigation::current_route());
    });

    move || match state.route.get() {
        Ok(Route::Home) => view! { <HomePage state=state /> }.into_any(),
        Ok(Route::Profile { handle }) => view! { <ProfilePage state=state handle=handle /> }.into_any(),
        Ok(Route::Post { id }) => view! { <SinglePostPage state=state id=id /> }.into_any(),
        Err(err) => {
            leptos::logging::error!("route error: {err}");
            view! {
                <LayoutPage>
                    <PageMessage message=PageState::<()>::NOT_FOUND_MESSAGE />
                </LayoutPage>
            }
            .into_any()
        }
    }
}
