use chirp_client::User;
use chirp_client::view::{PageState, profile_title};
use leptos::prelude::*;

use crate::api;
use crate::components::feed::FeedList;
use crate::components::go_back::GoBack;
use crate::components::layout::LayoutPage;
use crate::components::loading::{Loading, PageMessage};
use crate::navigation;
use crate::state::AppState;

/// Лента автора. Пустая лента показывает «No posts yet».
#[component]
fn ProfileFeed(state: AppState, user_id: String) -> impl IntoView {
    let feed = LocalResource::new(move || {
        let user_id = user_id.clone();
        async move {
            PageState::from_result(api::get_posts_by_user(&user_id).await)
                .empty_when(Vec::is_empty)
        }
    });

    move || {
        let page = feed.get().unwrap_or(PageState::Loading);
        view! { <FeedList state=state page=page /> }
    }
}

#[component]
fn ProfileBanner(user: User) -> impl IntoView {
    let username = user.username.clone().unwrap_or_default();
    let alt = format!("{username}'s profile picture");

    view! {
        <div class="profile-banner">
            <img
                class="profile-avatar"
                src=user.profile_image_url
                alt=alt
                width="128"
                height="128"
            />
        </div>
        <div class="profile-handle">{format!("@{username}")}</div>
    }
}

/// Страница профиля: `/@{handle}`.
#[component]
pub(crate) fn ProfilePage(state: AppState, handle: String) -> impl IntoView {
    let profile = LocalResource::new(move || {
        let handle = handle.clone();
        async move {
            PageState::from_result(api::get_user_by_username(&handle).await)
        }
    });

    Effect::new(move |_| {
        if let Some(PageState::Ready(user)) = profile.get() {
            navigation::set_title(&profile_title(&user));
        }
    });

    view! {
        <LayoutPage>
            <GoBack state=state />
            {move || match profile.get().unwrap_or(PageState::Loading) {
                PageState::Loading => view! { <Loading /> }.into_any(),
                PageState::Ready(user) => {
                    let user_id = user.id.clone();
                    view! {
                        <ProfileBanner user=user />
                        <ProfileFeed state=state user_id=user_id />
                    }
                    .into_any()
                }
                other => {
                    let message = other.message().unwrap_or_default();
                    view! { <PageMessage message=message /> }.into_any()
                }
            }}
        </LayoutPage>
    }
}
