use chirp_client::FeedItem;
use chirp_client::view::PageState;
use leptos::prelude::*;

use crate::api;
use crate::components::loading::{Loading, PageMessage};
use crate::components::post_view::PostView;
use crate::state::AppState;

/// Список постов или текст состояния страницы.
#[component]
pub(crate) fn FeedList(state: AppState, page: PageState<Vec<FeedItem>>) -> impl IntoView {
    match page {
        PageState::Loading => view! { <Loading /> }.into_any(),
        PageState::Ready(items) => view! {
            <div class="feed">
                <For
                    each=move || items.clone()
                    key=|item| item.post.id.clone()
                    children=move |item| view! { <PostView state=state item=item /> }
                />
            </div>
        }
        .into_any(),
        other => {
            let message = other.message().unwrap_or_default();
            view! { <PageMessage message=message /> }.into_any()
        }
    }
}

/// Глобальная лента. Перезапрашивается при каждой инвалидации.
#[component]
pub(crate) fn Feed(state: AppState) -> impl IntoView {
    let feed = LocalResource::new(move || {
        state.feed_version.track();
        async move { PageState::from_result(api::get_all().await) }
    });

    move || {
        let page = feed.get().unwrap_or(PageState::Loading);
        view! { <FeedList state=state page=page /> }
    }
}
